//! Search query model and URL construction.
//!
//! A [`SearchQuery`] describes one flexible, any-destination, round-trip
//! search; [`SearchQuery::to_url`] is a pure function from query to a fully
//! form-urlencoded URL.

use chrono::{Duration, Local, NaiveDate};
use url::Url;

/// Departure window shared by every query in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub depart_from: NaiveDate,
    pub return_by: NaiveDate,
}

impl DateWindow {
    /// Today through today + `days`.
    pub fn starting_today(days: i64) -> Self {
        let today = Local::now().date_naive();
        Self {
            depart_from: today,
            return_by: today + Duration::days(days),
        }
    }
}

/// Parameters for one origin's search.
///
/// Dates are carried as ISO text so an unset value is simply empty; the
/// search endpoint answers such a query with zero results, which the
/// extractor represents as an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: String,
    pub depart_date: String,
    pub return_date: String,
    pub min_stay_days: u32,
    pub max_stay_days: u32,
    pub adults: u32,
    pub currency: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            origin: String::new(),
            depart_date: String::new(),
            return_date: String::new(),
            min_stay_days: 1,
            max_stay_days: 7,
            adults: 2,
            currency: "PLN".to_string(),
        }
    }
}

impl SearchQuery {
    pub fn new(origin: &str, window: DateWindow, config: &crate::config::SearchConfig) -> Self {
        Self {
            origin: origin.to_string(),
            depart_date: window.depart_from.to_string(),
            return_date: window.return_by.to_string(),
            min_stay_days: config.min_stay_days,
            max_stay_days: config.max_stay_days,
            adults: config.adults,
            currency: config.currency.clone(),
        }
    }

    /// Build the search URL against `base`.
    ///
    /// Deterministic; all values go through the form-urlencoded serializer,
    /// so spaces become `+` and brackets are percent-escaped.
    pub fn to_url(&self, base: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(base)?;
        url.query_pairs_mut()
            .append_pair("searchtype", "flexi")
            .append_pair("tp", "0")
            .append_pair("isOneway", "return")
            .append_pair("srcAirport", &self.origin)
            .append_pair("dstAirport", "Anywhere [XXX]")
            .append_pair("anywhere", "true")
            .append_pair("depdate", &self.depart_date)
            .append_pair("arrdate", &self.return_date)
            .append_pair("minDaysStay", &self.min_stay_days.to_string())
            .append_pair("maxDaysStay", &self.max_stay_days.to_string())
            .append_pair("adults", &self.adults.to_string())
            .append_pair("currency", &self.currency)
            .append_pair("resultSubmit", "Search");
        Ok(url)
    }
}
