//! # Skyfare
//!
//! A scraper for flexible "anywhere" round-trip flight offers, producing
//! CSV tables consumed by a map dashboard.
//!
//! ## Architecture
//!
//! Skyfare follows a modular pipeline architecture:
//!
//! ```text
//! SearchQuery → Fetcher → Parser → RouteTable → CsvStore
//! ```
//!
//! - [`search`]: query model and search-URL construction
//! - [`fetcher`]: headless-Chrome navigation plus plain HTTP retrieval
//! - [`parser`]: result-fragment extraction into [`FlightRecord`](domain::FlightRecord)s
//! - [`extract`]: per-airport orchestration with retry and row-skip
//! - [`pipeline`]: full-run assembly across the configured airport list
//! - [`store`]: CSV persistence (one table per airport plus a combined table)
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the search URL for one origin
//! skyfare url "Warsaw [WAW]"
//!
//! # List configured airports
//! skyfare airports
//!
//! # Scrape every configured origin and write CSV tables
//! skyfare scrape
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together configuration
/// and the CSV store.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `./skyfare.toml` (or `~/.config/skyfare/config.toml`),
/// supplying the airport lists, search parameters, fetch policy and
/// output location.
pub mod config;

/// Core domain models.
///
/// - [`FlightRecord`](domain::FlightRecord): one direction of one offer
/// - [`RouteTable`](domain::RouteTable): records from one airport's query
/// - [`Dataset`](domain::Dataset): run-wide accumulation
pub mod domain;

/// Per-airport extraction: URL build, fetch with retry, row parsing.
pub mod extract;

/// Page fetching.
///
/// - [`Fetch`](fetcher::Fetch): async trait for page retrieval
/// - [`BrowserFetcher`](fetcher::BrowserFetcher): chromiumoxide + reqwest implementation
pub mod fetcher;

/// Result-row parsing.
///
/// Converts one `.result` HTML fragment into a fully populated
/// [`FlightRecord`](domain::FlightRecord), or a
/// [`RowError`](parser::RowError) naming why the row was unusable.
pub mod parser;

/// Full-run assembly across the airport list.
pub mod pipeline;

/// Search query model and URL construction.
pub mod search;

/// CSV persistence layer.
pub mod store;
