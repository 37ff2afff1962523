pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skyfare")]
#[command(about = "Scrape flexible any-destination flight offers into CSV tables", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ./skyfare.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape every configured origin airport and write the CSV tables
    Scrape,
    /// Print the search URL built for one origin
    Url {
        /// Origin airport, e.g. "Warsaw [WAW]"
        origin: String,
    },
    /// List the configured airports
    Airports,
}
