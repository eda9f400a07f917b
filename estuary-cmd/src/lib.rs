//! Command implementations for the estuary CLI.
//!
//! Provides subcommands that run the same selection handler as the map
//! against a text surface, and export a region's points as CSV.

use clap::Subcommand;
use estuary_core::config::MapConfig;
use log::info;
use std::path::Path;

pub mod export;
pub mod show;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch an estuary's points and print the markers the map would show
    Show {
        /// Estuary identifier, e.g. "ganga"
        #[arg(short = 'r', long)]
        region: String,

        /// Endpoint base URL (overrides api_base from the config)
        #[arg(short = 'b', long)]
        base_url: Option<String>,

        /// Path to a JSON map config
        #[arg(short = 'c', long)]
        config: Option<String>,
    },

    /// Fetch an estuary's points and write them to a CSV file
    Export {
        /// Estuary identifier, e.g. "ganga"
        #[arg(short = 'r', long)]
        region: String,

        /// Output path for the CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Endpoint base URL (overrides api_base from the config)
        #[arg(short = 'b', long)]
        base_url: Option<String>,

        /// Path to a JSON map config
        #[arg(short = 'c', long)]
        config: Option<String>,
    },

    /// List the estuaries offered in the dropdown
    Regions {
        /// Path to a JSON map config
        #[arg(short = 'c', long)]
        config: Option<String>,
    },
}

/// Load the config file if given, then apply a base URL override.
pub fn load_config(config: Option<&str>, base_url: Option<&str>) -> anyhow::Result<MapConfig> {
    let loaded = match config {
        Some(path) => {
            info!("Loading map config from {}", path);
            MapConfig::from_path(Path::new(path))
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?
        }
        None => MapConfig::default(),
    };
    Ok(match base_url {
        Some(url) => loaded.with_api_base(url),
        None => loaded,
    })
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Show {
            region,
            base_url,
            config,
        } => {
            let config = load_config(config.as_deref(), base_url.as_deref())?;
            show::run_show(&region, &config).await
        }
        Command::Export {
            region,
            output,
            base_url,
            config,
        } => {
            let config = load_config(config.as_deref(), base_url.as_deref())?;
            export::run_export(&region, &output, &config).await
        }
        Command::Regions { config } => {
            let config = load_config(config.as_deref(), None)?;
            for region in &config.regions {
                println!("{}\t{}", region.value, region.label);
            }
            Ok(())
        }
    }
}
