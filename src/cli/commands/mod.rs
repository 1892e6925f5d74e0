//! CLI commands implementation.

mod currency;
mod hospitals;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, Config, Settings};

#[derive(Parser)]
#[command(name = "carelink")]
#[command(about = "Healthcare marketplace API server and tooling")]
#[command(version)]
pub struct Cli {
    /// Config file (TOML or JSON); discovered automatically when omitted
    #[arg(short, long, global = true, env = "CARELINK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON API server
    Serve {
        /// Address to bind: port, host, or host:port
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Inspect or change the display currency
    Currency {
        #[command(subcommand)]
        command: CurrencyCommands,
    },

    /// Look up hospitals and clinics
    Hospitals {
        #[command(subcommand)]
        command: HospitalCommands,
    },
}

#[derive(Subcommand)]
enum CurrencyCommands {
    /// Show the active currency (cached, else detected from IP)
    Show,
    /// Select a country's currency explicitly
    Set {
        /// ISO 3166-1 alpha-2 country code (e.g. ET, GB)
        country_code: String,
    },
    /// Detect the currency from a coordinate
    Detect {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Convert a USD amount into a currency
    Convert {
        /// Amount in USD
        amount: f64,
        /// Target currency code (defaults to the active currency)
        #[arg(short, long)]
        to: Option<String>,
    },
    /// List supported currencies
    List,
}

#[derive(Subcommand)]
enum HospitalCommands {
    /// Nearby hospitals from Google Places
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Search radius in meters (default 10000)
        #[arg(short, long)]
        radius: Option<u32>,
    },
    /// Nearby hospitals and clinics from OpenStreetMap
    Osm {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Search radius in meters (default 15000)
        #[arg(short, long)]
        radius: Option<u32>,
    },
    /// Google Places details for one place
    Details {
        place_id: String,
    },
}

async fn resolve_settings(config_path: Option<PathBuf>) -> anyhow::Result<Settings> {
    match config_path {
        Some(path) => {
            let config = Config::load_from_path(&path)
                .await
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            let mut settings = Settings::default();
            config.apply_to_settings(&mut settings);
            Ok(settings.with_env_overrides())
        }
        None => Ok(load_settings().await),
    }
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(cli.config).await?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Currency { command } => match command {
            CurrencyCommands::Show => currency::cmd_show(&settings).await,
            CurrencyCommands::Set { country_code } => {
                currency::cmd_set(&settings, &country_code).await
            }
            CurrencyCommands::Detect { lat, lng } => {
                currency::cmd_detect(&settings, lat, lng).await
            }
            CurrencyCommands::Convert { amount, to } => {
                currency::cmd_convert(&settings, amount, to.as_deref()).await
            }
            CurrencyCommands::List => currency::cmd_list(),
        },
        Commands::Hospitals { command } => match command {
            HospitalCommands::Nearby { lat, lng, radius } => {
                hospitals::cmd_nearby(&settings, lat, lng, radius).await
            }
            HospitalCommands::Osm { lat, lng, radius } => {
                hospitals::cmd_osm(&settings, lat, lng, radius).await
            }
            HospitalCommands::Details { place_id } => {
                hospitals::cmd_details(&settings, &place_id).await
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "carelink", "hospitals", "osm", "--lat", "-1.29", "--lng", "36.82",
        ])
        .unwrap();
        match cli.command {
            Commands::Hospitals {
                command: HospitalCommands::Osm { lat, lng, radius },
            } => {
                assert_eq!(lat, -1.29);
                assert_eq!(lng, 36.82);
                assert_eq!(radius, None);
            }
            _ => panic!("expected hospitals osm"),
        }
    }
}
