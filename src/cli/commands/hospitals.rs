//! Facility lookup commands.

use console::style;

use crate::config::Settings;
use crate::facilities::{search_osm, search_places, Coordinate, DetailsOutcome, FacilitySearch};
use crate::server::{AppState, MISSING_API_KEY_MESSAGE};

fn location(lat: f64, lng: f64) -> anyhow::Result<Coordinate> {
    let location = Coordinate::new(lat, lng);
    if !location.is_valid() {
        anyhow::bail!("Coordinate out of range: {}, {}", lat, lng);
    }
    Ok(location)
}

fn print_search(search: FacilitySearch) -> anyhow::Result<()> {
    if let Some(error) = search.error {
        eprintln!("{} {}", style("✗").red(), error);
        anyhow::bail!("Facility search failed");
    }

    if search.facilities.is_empty() {
        println!("{} No facilities found", style("!").yellow());
        return Ok(());
    }

    println!(
        "{} {} facilities",
        style("✓").green(),
        search.facilities.len()
    );
    for facility in &search.facilities {
        let emergency = if facility.emergency {
            style(" [emergency]").red().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", style(&facility.name).bold(), emergency);
        println!("    {}", facility.address);
        println!(
            "    {:.5}, {:.5}  {}",
            facility.location.lat,
            facility.location.lng,
            style(&facility.id).dim()
        );
        if let Some(ref phone) = facility.phone {
            println!("    {}", phone);
        }
    }
    Ok(())
}

/// Google Places nearby search.
pub async fn cmd_nearby(
    settings: &Settings,
    lat: f64,
    lng: f64,
    radius: Option<u32>,
) -> anyhow::Result<()> {
    let location = location(lat, lng)?;
    let state = AppState::from_settings(settings)?;
    let places = state
        .places
        .ok_or_else(|| anyhow::anyhow!(MISSING_API_KEY_MESSAGE))?;
    print_search(search_places(&*places, location, radius).await)
}

/// OpenStreetMap search.
pub async fn cmd_osm(
    settings: &Settings,
    lat: f64,
    lng: f64,
    radius: Option<u32>,
) -> anyhow::Result<()> {
    let location = location(lat, lng)?;
    let state = AppState::from_settings(settings)?;
    print_search(search_osm(&*state.overpass, location, radius).await)
}

/// Google Places details.
pub async fn cmd_details(settings: &Settings, place_id: &str) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let places = state
        .places
        .ok_or_else(|| anyhow::anyhow!(MISSING_API_KEY_MESSAGE))?;

    match places.details(place_id).await? {
        DetailsOutcome::Found(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        DetailsOutcome::ProviderError { status, message } => {
            anyhow::bail!(
                "Google Places API error: {}{}",
                status,
                message.map(|m| format!(" ({})", m)).unwrap_or_default()
            )
        }
    }
}
