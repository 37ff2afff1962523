use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skyfare::cli::{commands, Cli, Commands};
use skyfare::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;

    match cli.command {
        Commands::Scrape => {
            commands::scrape(&config).await?;
        }
        Commands::Url { origin } => {
            commands::print_url(&config, &origin)?;
        }
        Commands::Airports => {
            commands::list_airports(&config);
        }
    }

    Ok(())
}
