//! Display-currency commands.

use console::style;

use crate::config::Settings;
use crate::currency::{
    by_currency_code, convert, default_currency, format, Resolution, ResolutionSource, CURRENCIES,
};
use crate::server::AppState;

fn print_resolution(resolution: &Resolution) {
    let source = match resolution.source {
        ResolutionSource::Cached => "saved preference",
        ResolutionSource::Detected => "IP detection",
        ResolutionSource::Coordinates => "location",
        ResolutionSource::Override => "explicit choice",
        ResolutionSource::Default => "default",
    };
    println!(
        "{} {} {} ({}) - {}",
        style("✓").green(),
        style(resolution.currency.code).bold(),
        resolution.currency.symbol,
        resolution.currency.country,
        style(source).dim()
    );
    println!("  {}", resolution.message);
}

/// Show the active currency.
pub async fn cmd_show(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    print_resolution(&state.currency.resolve_on_load().await);
    Ok(())
}

/// Select a country explicitly.
pub async fn cmd_set(settings: &Settings, country_code: &str) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let resolution = state.currency.set_country(country_code).await;
    if !resolution
        .currency
        .country_code
        .eq_ignore_ascii_case(country_code.trim())
    {
        println!(
            "{} {} is not supported, using the default currency",
            style("!").yellow(),
            country_code
        );
    }
    print_resolution(&resolution);
    Ok(())
}

/// Detect the currency from a coordinate.
pub async fn cmd_detect(settings: &Settings, lat: f64, lng: f64) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    print_resolution(&state.currency.detect_from_coordinates(lat, lng).await);
    Ok(())
}

/// Convert a USD amount.
pub async fn cmd_convert(settings: &Settings, amount: f64, to: Option<&str>) -> anyhow::Result<()> {
    let config = match to {
        Some(code) => {
            by_currency_code(code).ok_or_else(|| anyhow::anyhow!("Unsupported currency: {}", code))?
        }
        None => {
            let state = AppState::from_settings(settings)?;
            state.currency.cached().await.unwrap_or_else(default_currency)
        }
    };

    let converted = convert(amount, config.code);
    println!(
        "{} = {}",
        format(amount, default_currency()),
        style(format(converted, config)).bold()
    );
    Ok(())
}

/// List supported currencies.
pub fn cmd_list() -> anyhow::Result<()> {
    println!("{}", style("Supported currencies").bold());
    for config in CURRENCIES {
        println!(
            "  {} {:<4} {:<5} {}",
            style(config.country_code).cyan(),
            config.code,
            config.symbol,
            config.country
        );
    }
    Ok(())
}
