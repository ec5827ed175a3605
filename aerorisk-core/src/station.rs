//! Station registry and reference dataset
//!
//! Loads the per-station reference data (coordinates, land-cover and
//! demographic breakdowns, reference-year annual means) from a JSON
//! dataset file and serves lookups over it. The registry is immutable
//! once loaded.

use crate::demographics::DemographicBreakdown;
use crate::landcover::LandCoverBreakdown;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Fallback map center when the registry holds no stations: the center of
/// the Catalonia bounding box (lon 0-3, lat 40-43).
pub const FALLBACK_CENTER: (f64, f64) = (1.75, 41.5);

/// One monitoring station with its attached reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Unique station code.
    pub code: String,
    /// Full display name.
    pub name: String,
    /// Short map label.
    pub label: String,
    pub lon: f64,
    pub lat: f64,
    /// Land-cover breakdown for the station buffer, when surveyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_cover: Option<LandCoverBreakdown>,
    /// Population breakdown for the station buffer, when surveyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<DemographicBreakdown>,
    /// Reference-year annual mean concentration per pollutant name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annual_means: BTreeMap<String, f64>,
}

impl Station {
    /// Reference-year annual mean for a pollutant, matched
    /// case-insensitively.
    pub fn annual_mean(&self, pollutant: &str) -> Option<f64> {
        self.annual_means
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(pollutant))
            .map(|(_, value)| *value)
    }
}

/// Immutable, code-sorted collection of stations.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    /// Build a registry, validating every station's reference data.
    pub fn from_stations(mut stations: Vec<Station>) -> Result<Self> {
        stations.sort_by(|a, b| a.code.cmp(&b.code));
        for pair in stations.windows(2) {
            if pair[0].code == pair[1].code {
                anyhow::bail!("duplicate station code: {}", pair[0].code);
            }
        }
        for station in &stations {
            if let Some(land_cover) = &station.land_cover {
                land_cover
                    .validate()
                    .with_context(|| format!("station {}: invalid land cover", station.code))?;
            }
            if let Some(demographics) = &station.demographics {
                demographics
                    .validate()
                    .with_context(|| format!("station {}: invalid demographics", station.code))?;
            }
        }
        Ok(StationRegistry { stations })
    }

    /// Parse a registry from a JSON array of stations.
    pub fn from_json(json: &str) -> Result<Self> {
        let stations: Vec<Station> =
            serde_json::from_str(json).context("failed to parse station dataset")?;
        Self::from_stations(stations)
    }

    /// Load a registry from a JSON dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read station dataset: {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid station dataset: {}", path.display()))
    }

    /// Station by code.
    pub fn get(&self, code: &str) -> Option<&Station> {
        self.stations
            .binary_search_by(|s| s.code.as_str().cmp(code))
            .ok()
            .map(|i| &self.stations[i])
    }

    /// Station by display name (exact match).
    pub fn find_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Stations in deterministic code order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Mean (lon, lat) of the station set, or the Catalonia bbox center
    /// when the registry is empty.
    pub fn centroid(&self) -> (f64, f64) {
        if self.stations.is_empty() {
            return FALLBACK_CENTER;
        }
        let n = self.stations.len() as f64;
        let lon = self.stations.iter().map(|s| s.lon).sum::<f64>() / n;
        let lat = self.stations.iter().map(|s| s.lat).sum::<f64>() / n;
        (lon, lat)
    }
}
