//! Configuration management for Skyfare.
//!
//! Configuration is read from `./skyfare.toml`, falling back to
//! `~/.config/skyfare/config.toml`. The airport lists have no sensible
//! default, so a missing file or an empty origin list is fatal at startup.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "skyfare.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no config file found (looked for ./{CONFIG_FILE} and the user config directory)")]
    NotFound,

    #[error("config {path} lists no domestic airports")]
    NoAirports { path: PathBuf },
}

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub airports: AirportLists,
    pub search: SearchConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            airports: AirportLists::default(),
            search: SearchConfig::default(),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// The two named airport lists.
///
/// `domestic` is the origin list the scraper iterates. `regional` is the
/// broader set the map dashboard uses to filter destinations; it is carried
/// here so one file feeds both tools.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AirportLists {
    pub domestic: Vec<String>,
    pub regional: Vec<String>,
}

/// Search parameters shared by every query in a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint the queries are issued against
    pub base_url: String,

    /// Party size (default: 2)
    pub adults: u32,

    /// Three-letter currency code prices are requested in (default: "PLN")
    pub currency: String,

    /// Minimum stay length in nights (default: 1)
    pub min_stay_days: u32,

    /// Maximum stay length in nights (default: 7)
    pub max_stay_days: u32,

    /// Width of the departure window in days, starting today (default: 7)
    pub window_days: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.azair.eu/azfin.php".to_string(),
            adults: 2,
            currency: "PLN".to_string(),
            min_stay_days: 1,
            max_stay_days: 7,
            window_days: 7,
        }
    }
}

/// Fetch policy: browser behavior, client identity, timeout and retry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Client identifier sent with every HTTP request
    pub user_agent: String,

    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Wait after navigation for client-side content to settle, in
    /// milliseconds (default: 1000)
    pub wait_after_load_ms: u64,

    /// Attempts per page before the airport is given up on (default: 3)
    pub max_attempts: u32,

    /// Base delay between attempts in milliseconds, scaled linearly by the
    /// attempt number (default: 500)
    pub retry_backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: "Mozilla/5.0 (compatible; skyfare/0.1; +https://example.com)".to_string(),
            timeout_secs: 30,
            wait_after_load_ms: 1000,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl FetchConfig {
    /// Get the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the wait time after load as a Duration
    pub fn wait_after_load(&self) -> Duration {
        Duration::from_millis(self.wait_after_load_ms)
    }

    /// Get the backoff before retry `attempt` (1-based) as a Duration
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms * u64::from(attempt))
    }
}

/// Where the CSV tables land.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            prefix: "flights".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the default
    /// search path.
    ///
    /// Missing fields in the config file use default values; a missing
    /// file or an empty domestic airport list is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p,
            None => Self::default_config_path()?,
        };

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        if config.airports.domestic.is_empty() {
            return Err(ConfigError::NoAirports { path });
        }

        Ok(config)
    }

    /// First existing of `./skyfare.toml` and
    /// `~/.config/skyfare/config.toml`.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Ok(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("skyfare").join("config.toml");
            if user.exists() {
                return Ok(user);
            }
        }

        Err(ConfigError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[airports]
domestic = ["Warsaw [WAW]", "Krakow [KRK]"]
regional = ["Vienna [VIE]"]

[search]
adults = 1
currency = "EUR"

[fetch]
headless = false
max_attempts = 5

[output]
dir = "out"
prefix = "fares"
"#;

    #[test]
    fn test_parse_sample() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.airports.domestic.len(), 2);
        assert_eq!(config.airports.regional, vec!["Vienna [VIE]"]);
        assert_eq!(config.search.adults, 1);
        assert_eq!(config.search.currency, "EUR");
        // Unset fields fall back to defaults
        assert_eq!(config.search.min_stay_days, 1);
        assert_eq!(config.search.max_stay_days, 7);
        assert!(!config.fetch.headless);
        assert_eq!(config.fetch.max_attempts, 5);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.prefix, "fares");
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert!(config.fetch.headless);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(30));
        assert_eq!(config.fetch.wait_after_load(), Duration::from_millis(1000));
        assert_eq!(config.fetch.backoff(2), Duration::from_millis(1000));
        assert_eq!(config.search.window_days, 7);
        assert!(config.search.base_url.starts_with("https://"));
    }

    #[test]
    fn test_missing_airports_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skyfare.toml");
        fs::write(&path, "[search]\nadults = 2\n").unwrap();

        let err = Config::load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::NoAirports { .. }));
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skyfare.toml");
        fs::write(&path, "[airports\ndomestic = []").unwrap();

        let err = Config::load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
