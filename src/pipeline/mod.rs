//! Full-run assembly.
//!
//! [`DatasetAssembler`] walks the configured origin list in order, one
//! airport at a time. A failing airport is logged and skipped rather than
//! aborting the run; an airport with zero results is skipped silently; every
//! other airport gets its own CSV table and its rows appended to the
//! combined dataset, which is persisted once at the end.

use crate::app::Result;
use crate::config::Config;
use crate::domain::Dataset;
use crate::extract::RouteExtractor;
use crate::fetcher::Fetch;
use crate::search::{DateWindow, SearchQuery};
use crate::store::CsvStore;

/// What a run did, for reporting at the command layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub airports: usize,
    pub tables_written: usize,
    pub rows_total: usize,
    pub failures: usize,
}

pub struct DatasetAssembler<'a> {
    extractor: RouteExtractor<'a>,
    config: &'a Config,
    store: &'a CsvStore,
}

impl<'a> DatasetAssembler<'a> {
    pub fn new(fetcher: &'a dyn Fetch, config: &'a Config, store: &'a CsvStore) -> Self {
        Self {
            extractor: RouteExtractor::new(fetcher, &config.search.base_url, &config.fetch),
            config,
            store,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let window = DateWindow::starting_today(self.config.search.window_days);
        let airports = &self.config.airports.domestic;

        let mut combined = Dataset::new();
        let mut summary = RunSummary {
            airports: airports.len(),
            ..RunSummary::default()
        };

        for origin in airports {
            let query = SearchQuery::new(origin, window, &self.config.search);

            let table = match self.extractor.extract(&query).await {
                Ok(table) => table,
                Err(e) => {
                    tracing::error!(%origin, error = %e, "airport query failed, continuing");
                    summary.failures += 1;
                    continue;
                }
            };

            if table.is_empty() {
                tracing::info!(%origin, "no flights found");
                continue;
            }

            // Key the file by the code the site reports, not the query input
            let code = table.departure_code().unwrap_or(origin.as_str()).to_string();
            let path = self.store.write_route(&code, &table)?;
            tracing::debug!(path = %path.display(), "route table saved");
            println!("{} flights for {} saved", table.len(), code);

            summary.tables_written += 1;
            summary.rows_total += table.len();
            combined.extend_from(&table);
        }

        self.store.write_combined(&combined)?;
        Ok(summary)
    }
}
