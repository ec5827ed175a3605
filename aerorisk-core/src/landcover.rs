//! Land-cover classification
//!
//! Turns a station's per-category area breakdown into percentage shares
//! and a dominant category. Percentages use 2-decimal rounding; the
//! dominant category is a stable argmax over the canonical key order.

use crate::error::Error;
use crate::lcz::Lcz;
use crate::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measured land-cover areas inside a station's buffer.
///
/// Categories absent from `areas` count as zero. The total buffer area may
/// exceed the category sum (unclassified remainder is acceptable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandCoverBreakdown {
    /// Area per LCZ category, in square meters.
    #[serde(default)]
    pub areas: BTreeMap<Lcz, f64>,
    /// Total buffer area, in square meters.
    pub total: f64,
}

impl LandCoverBreakdown {
    /// Check the breakdown invariants: finite non-negative areas, and a
    /// total no smaller than the category sum (within rounding slack).
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.total.is_finite() || self.total < 0.0 {
            anyhow::bail!("land-cover total must be a non-negative number (got {})", self.total);
        }
        let mut sum = 0.0;
        for (lcz, area) in &self.areas {
            if !area.is_finite() || *area < 0.0 {
                anyhow::bail!(
                    "land-cover area for LCZ {} must be a non-negative number (got {})",
                    lcz.code(),
                    area
                );
            }
            sum += area;
        }
        // Rounding slack: measured areas are summed from raster cells.
        if sum > self.total + 1e-3 {
            anyhow::bail!(
                "land-cover areas sum to {} but total is only {}",
                sum,
                self.total
            );
        }
        Ok(())
    }
}

/// Percentage shares per category plus the dominant category.
#[derive(Debug, Clone, Serialize)]
pub struct LandCoverProfile {
    /// Percentage share per category, 2-decimal rounding. Empty when the
    /// station has no breakdown on file.
    pub percentages: BTreeMap<Lcz, f64>,
    /// Category covering the largest share; ties resolve to the earlier
    /// canonical key. `None` when no classification is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant: Option<Lcz>,
}

impl LandCoverProfile {
    /// Sentinel profile for stations with no breakdown on file.
    pub fn unavailable() -> Self {
        LandCoverProfile {
            percentages: BTreeMap::new(),
            dominant: None,
        }
    }
}

/// Classify a station's land cover.
///
/// A missing breakdown yields the "no classification" sentinel. A
/// breakdown with zero total area is an explicit `MissingData` failure,
/// never a division by zero.
pub fn classify(breakdown: Option<&LandCoverBreakdown>) -> Result<LandCoverProfile, Error> {
    let Some(breakdown) = breakdown else {
        return Ok(LandCoverProfile::unavailable());
    };
    if breakdown.total <= 0.0 {
        return Err(Error::MissingData(
            "land-cover breakdown has zero total area".to_string(),
        ));
    }

    let mut percentages = BTreeMap::new();
    let mut dominant = Lcz::ALL[0];
    let mut dominant_pct = f64::MIN;
    for lcz in Lcz::ALL {
        let area = breakdown.areas.get(&lcz).copied().unwrap_or(0.0);
        let pct = round2(100.0 * area / breakdown.total);
        percentages.insert(lcz, pct);
        // Strict comparison keeps the earlier canonical key on ties.
        if pct > dominant_pct {
            dominant = lcz;
            dominant_pct = pct;
        }
    }

    Ok(LandCoverProfile {
        percentages,
        dominant: Some(dominant),
    })
}
