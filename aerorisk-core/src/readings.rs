//! Hourly readings store
//!
//! Day-records of hourly pollutant readings as published upstream, keyed
//! by (station, date, pollutant). The store guarantees the caller sees a
//! duplicate-key inconsistency instead of a silently merged record.

use crate::error::Error;
use crate::hazard::{HourlyReadings, HOURS};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One station-day of hourly readings for one pollutant.
///
/// Hourly values are keyed `h01`..`h24` as in the upstream dataset;
/// absent keys are missing measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecord {
    pub station_code: String,
    pub date: NaiveDate,
    pub pollutant: String,
    #[serde(default)]
    pub hours: BTreeMap<String, f64>,
}

impl DayRecord {
    /// Whether this record matches a query key. Pollutant names match
    /// case-insensitively.
    pub fn matches(&self, station_code: &str, date: NaiveDate, pollutant: &str) -> bool {
        self.station_code == station_code
            && self.date == date
            && self.pollutant.eq_ignore_ascii_case(pollutant)
    }

    /// Decode the `h01`..`h24` keys into an hourly reading set.
    pub fn readings(&self) -> HourlyReadings {
        let mut readings = HourlyReadings::new();
        for hour in 1..=HOURS {
            let key = format!("h{:02}", hour);
            if let Some(value) = self.hours.get(&key) {
                readings.insert(hour, *value);
            }
        }
        readings
    }
}

/// In-memory collection of day-records.
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    records: Vec<DayRecord>,
}

impl ReadingStore {
    pub fn new(records: Vec<DayRecord>) -> Self {
        ReadingStore { records }
    }

    /// Empty store: every query falls back to historical data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a store from a JSON array of day-records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<DayRecord> =
            serde_json::from_str(json).context("failed to parse readings dataset")?;
        Ok(Self::new(records))
    }

    /// Load a store from a JSON dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read readings dataset: {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid readings dataset: {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The unique record for a (station, date, pollutant) key.
    ///
    /// `Ok(None)` means no data for that day; more than one matching
    /// record is an upstream inconsistency surfaced as an error, never
    /// averaged or resolved first-wins.
    pub fn find(
        &self,
        station_code: &str,
        date: NaiveDate,
        pollutant: &str,
    ) -> Result<Option<&DayRecord>, Error> {
        let mut matches = self
            .records
            .iter()
            .filter(|r| r.matches(station_code, date, pollutant));
        let first = matches.next();
        if matches.next().is_some() {
            return Err(Error::InconsistentData(format!(
                "more than one {} record for station {} on {}",
                pollutant, station_code, date
            )));
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(station: &str, date: &str, pollutant: &str) -> DayRecord {
        DayRecord {
            station_code: station.to_string(),
            date: date.parse().unwrap(),
            pollutant: pollutant.to_string(),
            hours: BTreeMap::new(),
        }
    }

    #[test]
    fn test_find_unique_record() {
        let mut r = record("08101001", "2022-03-01", "NO2");
        r.hours.insert("h01".to_string(), 30.0);
        let store = ReadingStore::new(vec![r, record("08101001", "2022-03-02", "NO2")]);

        let date = "2022-03-01".parse().unwrap();
        let found = store.find("08101001", date, "no2").unwrap().unwrap();
        assert_eq!(found.readings().get(1), Some(30.0));

        let missing_date = "2022-03-03".parse().unwrap();
        assert!(store.find("08101001", missing_date, "NO2").unwrap().is_none());
        assert!(store.find("08019043", date, "NO2").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_records_are_inconsistent() {
        let store = ReadingStore::new(vec![
            record("08101001", "2022-03-01", "NO2"),
            record("08101001", "2022-03-01", "NO2"),
        ]);
        let date = "2022-03-01".parse().unwrap();
        assert!(matches!(
            store.find("08101001", date, "NO2"),
            Err(Error::InconsistentData(_))
        ));
    }

    #[test]
    fn test_hour_keys_decode() {
        let mut r = record("08101001", "2022-03-01", "NO2");
        r.hours.insert("h01".to_string(), 10.0);
        r.hours.insert("h09".to_string(), 20.0);
        r.hours.insert("h10".to_string(), 30.0);
        r.hours.insert("h24".to_string(), 40.0);
        let readings = r.readings();
        assert_eq!(readings.present(), 4);
        assert_eq!(readings.get(9), Some(20.0));
        assert_eq!(readings.get(10), Some(30.0));
        assert_eq!(readings.mean(), Some(25.0));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "station_code": "08101001",
                "date": "2022-03-01",
                "pollutant": "NO2",
                "hours": {"h01": 28.0, "h02": 31.0}
            }
        ]"#;
        let store = ReadingStore::from_json(json).unwrap();
        assert_eq!(store.len(), 1);
        let date = "2022-03-01".parse().unwrap();
        let found = store.find("08101001", date, "NO2").unwrap().unwrap();
        assert_eq!(found.readings().mean(), Some(29.5));
    }
}
