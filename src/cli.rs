use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{serve, valuate};

#[derive(Parser)]
#[command(name = "starvest")]
#[command(about = "Starvest creator valuation service and CLI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Settings file (TOML, YAML or JSON)
        ///
        /// Defaults to `starvest.toml` (or .yaml/.json) in the working
        /// directory when present. Every setting can also be overridden with
        /// `STARVEST__` environment variables, e.g. `STARVEST__CURRENCY_CODE=EUR`.
        #[arg(short, long, env = "STARVEST_CONFIG")]
        config: Option<String>,

        /// Bind address for the web server, overriding the settings
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,
    },
    /// Value a creator snapshot and print the result as JSON
    ///
    /// The input file holds `{"creator": {...}, "investments": [...]}` in the
    /// same shape as the valuation endpoint's request body.
    Valuate {
        /// Path to the snapshot JSON file
        #[arg(short, long)]
        input: String,

        /// Settings file (TOML, YAML or JSON)
        #[arg(short, long, env = "STARVEST_CONFIG")]
        config: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { config, bind_address } => {
                serve(config.as_deref(), bind_address.as_deref()).await?;
            }
            Commands::Valuate { input, config } => {
                valuate(&input, config.as_deref())?;
            }
        }
        Ok(())
    }
}
