//! Demographic vulnerability
//!
//! Computes the Climate-Vulnerable-People (CVP) indicator from a
//! station's population breakdown by age band.

use crate::error::Error;
use crate::round2;
use serde::{Deserialize, Serialize};

/// Population counts inside a station's buffer.
///
/// Data files may carry additional nationality/origin counts; only the
/// age bands participate in the CVP computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicBreakdown {
    /// Total population.
    pub total: u64,
    /// Population aged 0-14.
    pub age_0_14: u64,
    /// Population aged 15-64.
    pub age_15_64: u64,
    /// Population aged 65 and over.
    pub age_65_plus: u64,
}

impl DemographicBreakdown {
    /// Check the breakdown invariants: age bands must fit in the total.
    pub fn validate(&self) -> anyhow::Result<()> {
        let band_sum = self.age_0_14 + self.age_15_64 + self.age_65_plus;
        if band_sum > self.total {
            anyhow::bail!(
                "age bands sum to {} but total population is only {}",
                band_sum,
                self.total
            );
        }
        Ok(())
    }
}

/// Which CVP indicator to compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvpMode {
    /// Elderly share of the total population: `100 * pop_65_plus / total`.
    #[default]
    RatioToTotal,
    /// Aging index per 100 youths: `100 * pop_65_plus / pop_0_14`. Can
    /// exceed 100.
    RatioToYouth,
}

impl CvpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CvpMode::RatioToTotal => "ratio_to_total",
            CvpMode::RatioToYouth => "ratio_to_youth",
        }
    }
}

/// Compute the CVP percentage, 2-decimal rounding.
///
/// A missing breakdown yields `Ok(None)` ("not available") which callers
/// must check before using the value in arithmetic. A zero denominator is
/// an explicit `MissingData` failure, never a silent NaN.
pub fn cvp(breakdown: Option<&DemographicBreakdown>, mode: CvpMode) -> Result<Option<f64>, Error> {
    let Some(breakdown) = breakdown else {
        return Ok(None);
    };
    let elderly = breakdown.age_65_plus as f64;
    let value = match mode {
        CvpMode::RatioToTotal => {
            if breakdown.total == 0 {
                return Err(Error::MissingData(
                    "demographic breakdown has zero total population".to_string(),
                ));
            }
            100.0 * elderly / breakdown.total as f64
        }
        CvpMode::RatioToYouth => {
            if breakdown.age_0_14 == 0 {
                return Err(Error::MissingData(
                    "demographic breakdown has no population aged 0-14".to_string(),
                ));
            }
            100.0 * elderly / breakdown.age_0_14 as f64
        }
    };
    Ok(Some(round2(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospitalet_breakdown() -> DemographicBreakdown {
        DemographicBreakdown {
            total: 52_579,
            age_0_14: 7_585,
            age_15_64: 35_542,
            age_65_plus: 9_280,
        }
    }

    #[test]
    fn test_ratio_to_total() {
        let value = cvp(Some(&hospitalet_breakdown()), CvpMode::RatioToTotal).unwrap();
        assert_eq!(value, Some(17.65));
    }

    #[test]
    fn test_ratio_to_youth_can_exceed_100() {
        let value = cvp(Some(&hospitalet_breakdown()), CvpMode::RatioToYouth).unwrap();
        assert_eq!(value, Some(122.35));
    }

    #[test]
    fn test_missing_breakdown_is_not_available() {
        assert_eq!(cvp(None, CvpMode::RatioToTotal).unwrap(), None);
        assert_eq!(cvp(None, CvpMode::RatioToYouth).unwrap(), None);
    }

    #[test]
    fn test_zero_denominators_are_missing_data() {
        let empty = DemographicBreakdown {
            total: 0,
            age_0_14: 0,
            age_15_64: 0,
            age_65_plus: 0,
        };
        assert!(matches!(
            cvp(Some(&empty), CvpMode::RatioToTotal),
            Err(Error::MissingData(_))
        ));
        let no_youth = DemographicBreakdown {
            total: 100,
            age_0_14: 0,
            age_15_64: 60,
            age_65_plus: 40,
        };
        assert!(matches!(
            cvp(Some(&no_youth), CvpMode::RatioToYouth),
            Err(Error::MissingData(_))
        ));
    }

    #[test]
    fn test_validate_rejects_band_overflow() {
        let breakdown = DemographicBreakdown {
            total: 100,
            age_0_14: 50,
            age_15_64: 40,
            age_65_plus: 20,
        };
        assert!(breakdown.validate().is_err());
        assert!(hospitalet_breakdown().validate().is_ok());
    }
}
