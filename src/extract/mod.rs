//! Per-airport extraction.
//!
//! [`RouteExtractor`] turns one [`SearchQuery`] into a [`RouteTable`]:
//! build the URL, fetch the page under the configured retry policy, parse
//! every result fragment. Row failures are skipped inside the parser;
//! fetch failures, once retries are exhausted, propagate to the caller.

use crate::app::Result;
use crate::config::FetchConfig;
use crate::domain::RouteTable;
use crate::fetcher::Fetch;
use crate::parser::RowParser;
use crate::search::SearchQuery;

pub struct RouteExtractor<'a> {
    fetcher: &'a dyn Fetch,
    parser: RowParser,
    base_url: String,
    policy: FetchConfig,
}

impl<'a> RouteExtractor<'a> {
    pub fn new(fetcher: &'a dyn Fetch, base_url: &str, policy: &FetchConfig) -> Self {
        Self {
            fetcher,
            parser: RowParser::new(),
            base_url: base_url.to_string(),
            policy: policy.clone(),
        }
    }

    /// Run one query. An answer page with zero result fragments is an empty
    /// table, not an error.
    pub async fn extract(&self, query: &SearchQuery) -> Result<RouteTable> {
        let url = query.to_url(&self.base_url)?;
        tracing::debug!(%url, origin = %query.origin, "fetching results page");

        let html = self.fetch_with_retry(url.as_str()).await?;
        Ok(self.parser.parse_document(&html))
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetcher.fetch_page(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts => {
                    tracing::warn!(attempt, error = %e, "fetch failed, retrying");
                    tokio::time::sleep(self.policy.backoff(attempt)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
