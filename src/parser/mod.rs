//! Result-row parsing.
//!
//! One `.result` fragment holds one bookable itinerary. The `.from` and
//! `.to` blocks read like `"08:10 Warsaw WAW"`: leading token is the clock
//! time, trailing token the airport code, everything between is the city.
//! Weekday and calendar date are not in those blocks; they sit in the
//! fragment's running text behind a literal `"There "` marker and have to be
//! picked out relative to the leg's clock time. That marker-relative lookup
//! is the fragile part and lives in [`leg_date`] with its own failure modes.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::domain::{FlightRecord, RouteTable};

/// Literal preceding the weekday/date annotation of a leg.
pub const DATE_MARKER: &str = "There ";

/// Why a single result row was unusable.
///
/// A row either becomes a fully populated [`FlightRecord`] or one of these;
/// partially populated records never leave this module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing .{0} block")]
    MissingBlock(&'static str),

    #[error("malformed .{0} block: {1:?}")]
    MalformedBlock(&'static str, String),

    #[error("date marker {DATE_MARKER:?} not found")]
    MarkerMissing,

    #[error("date marker {DATE_MARKER:?} occurs more than once before the leg time")]
    MarkerAmbiguous,

    #[error("leg time {0:?} not found after the date marker")]
    TimeMissing(String),

    #[error("malformed date annotation: {0:?}")]
    MalformedAnnotation(String),

    #[error("unparseable price: {0:?}")]
    BadPrice(String),
}

/// Parser for search-result pages, with its selectors compiled once.
pub struct RowParser {
    result: Selector,
    from: Selector,
    to: Selector,
    prices: Vec<Selector>,
}

impl Default for RowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RowParser {
    pub fn new() -> Self {
        let parse = |s: &str| Selector::parse(s).expect("valid selector");
        Self {
            result: parse(".result"),
            from: parse(".from"),
            to: parse(".to"),
            // Probed in priority order
            prices: vec![parse(".subPrice"), parse(".price"), parse(".priceTotal")],
        }
    }

    /// Parse every result fragment on the page.
    ///
    /// Zero fragments yield an empty table. Unusable rows are logged and
    /// skipped; parsing never aborts the page.
    pub fn parse_document(&self, html: &str) -> RouteTable {
        let document = Html::parse_document(html);
        let mut table = RouteTable::new();

        for (index, fragment) in document.select(&self.result).enumerate() {
            match self.parse_row(fragment) {
                Ok(record) => table.push(record),
                Err(reason) => {
                    tracing::warn!(row = index, %reason, "skipping result row");
                }
            }
        }

        table
    }

    /// Extract one [`FlightRecord`] from one result fragment.
    pub fn parse_row(&self, row: ElementRef<'_>) -> Result<FlightRecord, RowError> {
        let (departure_time, departure_city, departure_airport) =
            leg_block(row, &self.from, "from")?;
        let (arrival_time, arrival_city, arrival_airport) = leg_block(row, &self.to, "to")?;

        let text: String = row.text().collect();
        let (departure_weekday, departure_date) = leg_date(&text, &departure_time)?;
        let (arrival_weekday, arrival_date) = leg_date(&text, &arrival_time)?;

        let price = self.price(row)?;

        Ok(FlightRecord {
            departure_date,
            departure_weekday,
            departure_time,
            departure_city,
            departure_airport,
            arrival_date,
            arrival_weekday,
            arrival_time,
            arrival_city,
            arrival_airport,
            price,
        })
    }

    /// First present of `.subPrice`, `.price`, `.priceTotal`; leading token
    /// parsed as an integer. No marker at all means no price, which is fine;
    /// a present marker that does not parse fails the row.
    fn price(&self, row: ElementRef<'_>) -> Result<Option<u32>, RowError> {
        for selector in &self.prices {
            let Some(element) = row.select(selector).next() else {
                continue;
            };

            let raw: String = element.text().collect();
            let raw = raw.trim();
            let token = raw
                .split_whitespace()
                .next()
                .ok_or_else(|| RowError::BadPrice(raw.to_string()))?;
            let value = token
                .parse::<u32>()
                .map_err(|_| RowError::BadPrice(token.to_string()))?;
            return Ok(Some(value));
        }

        Ok(None)
    }
}

/// Split a `.from`/`.to` block into (time, city, airport).
///
/// A block with fewer than three tokens has no city and would produce a
/// record with a nonsensical blank, so it fails the row instead.
fn leg_block(
    row: ElementRef<'_>,
    selector: &Selector,
    name: &'static str,
) -> Result<(String, String, String), RowError> {
    let block = row
        .select(selector)
        .next()
        .ok_or(RowError::MissingBlock(name))?;

    let raw: String = block.text().collect();
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(RowError::MalformedBlock(name, raw.trim().to_string()));
    }

    let time = tokens[0].to_string();
    let airport = tokens[tokens.len() - 1].to_string();
    let city = tokens[1..tokens.len() - 1].join(" ");

    Ok((time, city, airport))
}

/// Marker-relative weekday/date extraction for one leg.
///
/// Preconditions checked explicitly: the marker must occur, must not recur
/// before the leg's clock time, and the intervening substring must start
/// with at least two tokens (weekday, then date). Anything else is a
/// signaled failure, never a silent misparse.
pub fn leg_date(text: &str, leg_time: &str) -> Result<(String, String), RowError> {
    let start = text.find(DATE_MARKER).ok_or(RowError::MarkerMissing)? + DATE_MARKER.len();
    let rest = &text[start..];

    let end = rest
        .find(leg_time)
        .ok_or_else(|| RowError::TimeMissing(leg_time.to_string()))?;
    let annotation = &rest[..end];

    if annotation.contains(DATE_MARKER) {
        return Err(RowError::MarkerAmbiguous);
    }

    let mut tokens = annotation.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(weekday), Some(date)) => Ok((weekday.to_string(), date.to_string())),
        _ => Err(RowError::MalformedAnnotation(annotation.trim().to_string())),
    }
}
