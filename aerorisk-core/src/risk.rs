//! Final risk classification
//!
//! Global invariants enforced:
//! - Deterministic risk calculations
//! - Unavailable inputs yield the explicit no-data tier, never a default
//!   threshold branch

use serde::{Deserialize, Serialize};

/// Final risk tier for a station-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    NoData,
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Ordinal level: 0 = no data, 1 = low, 2 = medium, 3 = high.
    pub fn level(self) -> u8 {
        match self {
            RiskTier::NoData => 0,
            RiskTier::Low => 1,
            RiskTier::Medium => 2,
            RiskTier::High => 3,
        }
    }

    /// Display color key (RGB triplet encoded as `RRR_GGG_BBB`).
    pub fn color_key(self) -> &'static str {
        match self {
            RiskTier::NoData => "250_250_250",
            RiskTier::Low => "000_200_000",
            RiskTier::Medium => "255_255_000",
            RiskTier::High => "255_000_000",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            RiskTier::NoData => "No data",
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

/// Thresholds on the vulnerability-weighted hazard separating the three
/// data-backed tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Weighted hazard at which risk becomes medium (default: 30).
    pub medium: f64,
    /// Weighted hazard at which risk becomes high (default: 40).
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            medium: 30.0,
            high: 40.0,
        }
    }
}

/// Outcome of the final risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskClassification {
    pub tier: RiskTier,
    /// Vulnerability-weighted hazard; absent when the tier is no-data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_hazard: Option<f64>,
}

/// Classify with the default thresholds.
pub fn classify(hazard: Option<f64>, vuci: f64, cvp: Option<f64>) -> RiskClassification {
    classify_with_thresholds(hazard, vuci, cvp, &RiskThresholds::default())
}

/// Combine the hazard value and the two vulnerability scores into a risk
/// tier.
///
/// `weighted = hazard * (vuci + cvp) / 100`, then strict `<` against the
/// thresholds. An unavailable hazard or CVP yields the no-data tier: a
/// data gap must stay distinguishable from a real alarm.
pub fn classify_with_thresholds(
    hazard: Option<f64>,
    vuci: f64,
    cvp: Option<f64>,
    thresholds: &RiskThresholds,
) -> RiskClassification {
    let (Some(hazard), Some(cvp)) = (hazard, cvp) else {
        return RiskClassification {
            tier: RiskTier::NoData,
            weighted_hazard: None,
        };
    };

    let weighted = hazard * (vuci + cvp) / 100.0;
    let tier = if weighted < thresholds.medium {
        RiskTier::Low
    } else if weighted < thresholds.high {
        RiskTier::Medium
    } else {
        RiskTier::High
    };
    RiskClassification {
        tier,
        weighted_hazard: Some(weighted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(classify(Some(20.0), 50.0, Some(40.0)).tier, RiskTier::Low);
        assert_eq!(
            classify(Some(35.0), 50.0, Some(50.0)).tier,
            RiskTier::Medium
        );
        assert_eq!(classify(Some(50.0), 50.0, Some(50.0)).tier, RiskTier::High);
    }

    #[test]
    fn test_boundary_is_strictly_less_than() {
        // weighted = 30 * (50 + 50) / 100 = 30 exactly: not < 30, so medium.
        let result = classify(Some(30.0), 50.0, Some(50.0));
        assert_eq!(result.weighted_hazard, Some(30.0));
        assert_eq!(result.tier, RiskTier::Medium);

        // weighted = 40 exactly: not < 40, so high.
        let result = classify(Some(40.0), 50.0, Some(50.0));
        assert_eq!(result.weighted_hazard, Some(40.0));
        assert_eq!(result.tier, RiskTier::High);
    }

    #[test]
    fn test_unavailable_hazard_is_no_data() {
        let result = classify(None, 80.0, Some(17.65));
        assert_eq!(result.tier, RiskTier::NoData);
        assert_eq!(result.weighted_hazard, None);
        assert_eq!(result.tier.color_key(), "250_250_250");
        assert_eq!(result.tier.caption(), "No data");
    }

    #[test]
    fn test_unavailable_cvp_is_no_data() {
        // A missing demographic index is a data gap, not a high-risk
        // signal; it must not fall through the threshold chain to "high".
        let result = classify(Some(80.0), 80.0, None);
        assert_eq!(result.tier, RiskTier::NoData);
        assert_eq!(result.weighted_hazard, None);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = RiskThresholds {
            medium: 10.0,
            high: 20.0,
        };
        let result = classify_with_thresholds(Some(15.0), 50.0, Some(50.0), &thresholds);
        assert_eq!(result.tier, RiskTier::Medium);
    }

    #[test]
    fn test_color_and_caption_tables() {
        assert_eq!(RiskTier::Low.color_key(), "000_200_000");
        assert_eq!(RiskTier::Medium.color_key(), "255_255_000");
        assert_eq!(RiskTier::High.color_key(), "255_000_000");
        assert_eq!(RiskTier::Low.caption(), "low");
        assert_eq!(RiskTier::Medium.caption(), "medium");
        assert_eq!(RiskTier::High.caption(), "high");
        assert_eq!(RiskTier::NoData.level(), 0);
        assert_eq!(RiskTier::High.level(), 3);
    }
}
