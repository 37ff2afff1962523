//! CSV persistence layer.
//!
//! One table per airport with data, named `<prefix>_<CODE>.csv`, plus one
//! combined `<prefix>.csv` for the whole run. Column order comes from the
//! [`FlightRecord`](crate::domain::FlightRecord) field order; a null price
//! serializes to an empty field.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::domain::{Dataset, FlightRecord, RouteTable};

pub struct CsvStore {
    dir: PathBuf,
    prefix: String,
}

impl CsvStore {
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        }
    }

    /// Persist one airport's table, keyed by the departure code observed in
    /// the data.
    pub fn write_route(&self, code: &str, table: &RouteTable) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}_{}.csv", self.prefix, code));
        self.write_records(&path, table.records())?;
        Ok(path)
    }

    /// Persist the combined table for the whole run.
    pub fn write_combined(&self, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.csv", self.prefix));
        self.write_records(&path, dataset.records())?;
        Ok(path)
    }

    fn write_records(&self, path: &Path, records: &[FlightRecord]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Header is written explicitly so a run with zero rows still
        // produces a file with the full column schema
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(FlightRecord::COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: Option<u32>) -> FlightRecord {
        FlightRecord {
            departure_date: "2026-08-28".into(),
            departure_weekday: "Fri".into(),
            departure_time: "08:10".into(),
            departure_city: "Warsaw".into(),
            departure_airport: "WAW".into(),
            arrival_date: "2026-08-28".into(),
            arrival_weekday: "Fri".into(),
            arrival_time: "10:25".into(),
            arrival_city: "Alicante".into(),
            arrival_airport: "ALC".into(),
            price,
        }
    }

    #[test]
    fn test_route_file_schema_and_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path(), "flights");

        let table: RouteTable = vec![record(Some(120)), record(None)].into_iter().collect();
        let path = store.write_route("WAW", &table).unwrap();
        assert_eq!(path.file_name().unwrap(), "flights_WAW.csv");

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec![
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
            ])
        );

        let rows: Vec<FlightRecord> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].price, Some(120));
        assert_eq!(rows[1].price, None);
        assert_eq!(rows[1].arrival_city, "Alicante");
    }

    #[test]
    fn test_combined_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path(), "flights");

        let mut dataset = Dataset::new();
        let table: RouteTable = vec![record(Some(95))].into_iter().collect();
        dataset.extend_from(&table);

        let path = store.write_combined(&dataset).unwrap();
        assert_eq!(path.file_name().unwrap(), "flights.csv");
        assert!(path.exists());
    }

    #[test]
    fn test_empty_dataset_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path(), "flights");

        let path = store.write_combined(&Dataset::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("departure_date,"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(FlightRecord::COLUMNS.to_vec())
        );
        assert_eq!(reader.deserialize::<FlightRecord>().count(), 0);
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("tables");
        let store = CsvStore::new(&nested, "flights");

        let table: RouteTable = vec![record(None)].into_iter().collect();
        store.write_route("KRK", &table).unwrap();
        assert!(nested.join("flights_KRK.csv").exists());
    }
}
