use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::fetcher::BrowserFetcher;
use crate::pipeline::DatasetAssembler;
use crate::search::{DateWindow, SearchQuery};

pub async fn scrape(config: &Config) -> Result<()> {
    let ctx = AppContext::new(config.clone());

    println!(
        "Scraping {} origin airports...",
        ctx.config.airports.domestic.len()
    );

    let fetcher = BrowserFetcher::launch(&ctx.config.fetch).await?;

    let outcome = {
        let assembler = DatasetAssembler::new(&fetcher, &ctx.config, &ctx.store);
        assembler.run().await
    };

    // Release the browser even when the run failed
    if let Err(e) = fetcher.close().await {
        tracing::warn!(error = %e, "browser did not shut down cleanly");
    }

    let summary = outcome?;
    println!(
        "Scrape complete: {} rows in {} tables, {} of {} airports failed",
        summary.rows_total, summary.tables_written, summary.failures, summary.airports
    );

    Ok(())
}

pub fn print_url(config: &Config, origin: &str) -> Result<()> {
    let window = DateWindow::starting_today(config.search.window_days);
    let query = SearchQuery::new(origin, window, &config.search);
    let url = query.to_url(&config.search.base_url)?;
    println!("{url}");
    Ok(())
}

pub fn list_airports(config: &Config) {
    println!("Domestic origins ({}):", config.airports.domestic.len());
    for airport in &config.airports.domestic {
        println!("  {airport}");
    }

    if !config.airports.regional.is_empty() {
        println!("Regional set ({}):", config.airports.regional.len());
        for airport in &config.airports.regional {
            println!("  {airport}");
        }
    }
}
