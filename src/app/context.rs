use crate::config::Config;
use crate::store::CsvStore;

/// Wires together the pieces a run needs. The browser session is not part
/// of the context: the scrape command acquires it at run start and releases
/// it at run end.
pub struct AppContext {
    pub config: Config,
    pub store: CsvStore,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let store = CsvStore::new(&config.output.dir, &config.output.prefix);
        Self { config, store }
    }
}
