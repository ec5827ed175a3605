//! Aerorisk core library - air-pollution health-risk classification for
//! metropolitan monitoring stations

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is per station-day, pure over immutable reference tables
// - No shared mutable state, no I/O during classification
// - Unavailable inputs become explicit markers, never NaN fallthrough
// - Deterministic ordering; identical input yields identical output

pub mod assessment;
pub mod config;
pub mod demographics;
pub mod error;
pub mod hazard;
pub mod landcover;
pub mod lcz;
pub mod pollutant;
pub mod readings;
pub mod report;
pub mod risk;
pub mod scenario;
pub mod station;

pub use config::ResolvedConfig;
pub use error::Error;
pub use readings::ReadingStore;
pub use report::{render_json, render_text, sort_assessments, StationAssessment};
pub use station::StationRegistry;

use assessment::AssessOptions;
use chrono::NaiveDate;

/// Round to 2 decimal places, the precision the upstream datasets
/// publish.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assess one station-day with default configuration.
pub fn assess(
    registry: &StationRegistry,
    store: &ReadingStore,
    station_code: &str,
    date: NaiveDate,
    pollutant: &str,
) -> Result<StationAssessment, Error> {
    assess_with_config(registry, store, station_code, date, pollutant, None)
}

/// Assess one station-day with optional resolved configuration.
pub fn assess_with_config(
    registry: &StationRegistry,
    store: &ReadingStore,
    station_code: &str,
    date: NaiveDate,
    pollutant: &str,
    resolved_config: Option<&ResolvedConfig>,
) -> Result<StationAssessment, Error> {
    let defaults = ResolvedConfig::default();
    let resolved = resolved_config.unwrap_or(&defaults);
    let options = AssessOptions {
        cvp_mode: resolved.cvp_mode,
        thresholds: &resolved.thresholds,
        reference_year: &resolved.reference_year,
    };
    assessment::assess_query(registry, store, station_code, date, pollutant, &options)
}

/// Assess every station for one date and pollutant, sorted most severe
/// first, with the config's min_tier/top filters applied.
pub fn assess_all_with_config(
    registry: &StationRegistry,
    store: &ReadingStore,
    date: NaiveDate,
    pollutant: &str,
    resolved_config: Option<&ResolvedConfig>,
) -> Vec<StationAssessment> {
    let defaults = ResolvedConfig::default();
    let resolved = resolved_config.unwrap_or(&defaults);
    let options = AssessOptions {
        cvp_mode: resolved.cvp_mode,
        thresholds: &resolved.thresholds,
        reference_year: &resolved.reference_year,
    };

    let assessments = assessment::assess_all(registry, store, date, pollutant, &options);
    let sorted = sort_assessments(assessments);

    let filtered: Vec<StationAssessment> = match resolved.min_tier {
        Some(min) => sorted.into_iter().filter(|a| a.risk.tier >= min).collect(),
        None => sorted,
    };
    match resolved.top {
        Some(top) => filtered.into_iter().take(top).collect(),
        None => filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demographics::DemographicBreakdown;
    use crate::landcover::LandCoverBreakdown;
    use crate::lcz::Lcz;
    use crate::station::Station;
    use std::collections::BTreeMap;

    #[test]
    fn test_round2() {
        assert_eq!(round2(63.419_557), 63.42);
        assert_eq!(round2(17.649_631), 17.65);
        assert_eq!(round2(-1.005), -1.0);
        assert_eq!(round2(0.0), 0.0);
    }

    fn test_registry() -> StationRegistry {
        let mut areas = BTreeMap::new();
        areas.insert(Lcz::CompactMidrise, 600.0);
        let mut annual_means = BTreeMap::new();
        annual_means.insert("NO2".to_string(), 33.0);
        let full = Station {
            code: "08101001".to_string(),
            name: "l'Hospitalet de Llobregat".to_string(),
            label: "Hospitalet".to_string(),
            lon: 2.1151,
            lat: 41.3697,
            land_cover: Some(LandCoverBreakdown {
                areas,
                total: 1000.0,
            }),
            demographics: Some(DemographicBreakdown {
                total: 1000,
                age_0_14: 150,
                age_15_64: 670,
                age_65_plus: 180,
            }),
            annual_means,
        };
        let bare = Station {
            code: "08019043".to_string(),
            name: "Barcelona (Eixample)".to_string(),
            label: "Eixample".to_string(),
            lon: 2.1538,
            lat: 41.3853,
            land_cover: None,
            demographics: None,
            annual_means: BTreeMap::new(),
        };
        StationRegistry::from_stations(vec![full, bare]).unwrap()
    }

    #[test]
    fn test_assess_all_sorts_and_filters() {
        let registry = test_registry();
        let store = ReadingStore::empty();
        let date = "2022-03-01".parse().unwrap();

        let all = assess_all_with_config(&registry, &store, date, "NO2", None);
        assert_eq!(all.len(), 2);
        // The station with data sorts ahead of the no-data one.
        assert_eq!(all[0].station_code, "08101001");
        assert_eq!(all[0].vuci, 80);
        assert_eq!(all[0].cvp, Some(18.0));
        // weighted = 33 * (80 + 18) / 100 = 32.34 -> medium
        assert_eq!(all[0].risk.tier, 2);
        assert_eq!(all[1].risk.tier, 0);

        let config = ResolvedConfig {
            min_tier: Some(1),
            ..ResolvedConfig::default()
        };
        let filtered = assess_all_with_config(&registry, &store, date, "NO2", Some(&config));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].station_code, "08101001");

        let config = ResolvedConfig {
            top: Some(1),
            ..ResolvedConfig::default()
        };
        let topped = assess_all_with_config(&registry, &store, date, "NO2", Some(&config));
        assert_eq!(topped.len(), 1);
    }

    #[test]
    fn test_assess_single_station() {
        let registry = test_registry();
        let store = ReadingStore::empty();
        let date = "2022-03-01".parse().unwrap();

        let a = assess(&registry, &store, "08101001", date, "NO2").unwrap();
        assert_eq!(a.scenario.as_ref().unwrap().code, "C1");
        assert!(matches!(
            assess(&registry, &store, "nope", date, "NO2"),
            Err(Error::MissingData(_))
        ));
    }
}
