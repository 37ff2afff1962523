use serde::{Deserialize, Serialize};

/// One direction of one offer, as scraped off a result fragment.
///
/// Either every field is populated or the row is discarded during parsing;
/// `price` is the only field allowed to be absent (some fragments carry no
/// price marker). Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub departure_date: String,
    pub departure_weekday: String,
    pub departure_time: String,
    pub departure_city: String,
    pub departure_airport: String,
    pub arrival_date: String,
    pub arrival_weekday: String,
    pub arrival_time: String,
    pub arrival_city: String,
    pub arrival_airport: String,
    pub price: Option<u32>,
}

/// Ordered records produced from one (airport, date-window) query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    records: Vec<FlightRecord>,
}

impl FlightRecord {
    /// Column names in persisted order, matching the field order above.
    pub const COLUMNS: [&'static str; 11] = [
        "departure_date",
        "departure_weekday",
        "departure_time",
        "departure_city",
        "departure_airport",
        "arrival_date",
        "arrival_weekday",
        "arrival_time",
        "arrival_city",
        "arrival_airport",
        "price",
    ];
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FlightRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Departure code as observed in the scraped data, not as supplied in
    /// the query. The two can differ when the site normalizes codes.
    pub fn departure_code(&self) -> Option<&str> {
        self.records
            .first()
            .map(|r| r.departure_airport.as_str())
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }
}

impl FromIterator<FlightRecord> for RouteTable {
    fn from_iter<I: IntoIterator<Item = FlightRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Run-wide accumulation, persisted once after all airports are processed.
///
/// Plain concatenation in airport-iteration order; duplicates across
/// airports are possible and acceptable.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<FlightRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_from(&mut self, table: &RouteTable) {
        self.records.extend_from_slice(table.records());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(airport: &str) -> FlightRecord {
        FlightRecord {
            departure_date: "2026-08-28".into(),
            departure_weekday: "Fri".into(),
            departure_time: "08:10".into(),
            departure_city: "Warsaw".into(),
            departure_airport: airport.into(),
            arrival_date: "2026-08-28".into(),
            arrival_weekday: "Fri".into(),
            arrival_time: "10:25".into(),
            arrival_city: "Alicante".into(),
            arrival_airport: "ALC".into(),
            price: Some(120),
        }
    }

    #[test]
    fn test_departure_code_from_data() {
        let table: RouteTable = vec![record("WAW"), record("WMI")].into_iter().collect();
        assert_eq!(table.departure_code(), Some("WAW"));
        assert_eq!(RouteTable::new().departure_code(), None);
    }

    #[test]
    fn test_dataset_concatenation_order() {
        let first: RouteTable = vec![record("WAW")].into_iter().collect();
        let second: RouteTable = vec![record("KRK"), record("KRK")].into_iter().collect();

        let mut dataset = Dataset::new();
        dataset.extend_from(&first);
        dataset.extend_from(&second);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].departure_airport, "WAW");
        assert_eq!(dataset.records()[2].departure_airport, "KRK");
    }
}
