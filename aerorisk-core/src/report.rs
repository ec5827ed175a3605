//! Assessment records and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Every field is a computed value or an explicit unavailable marker

use crate::hazard::HazardValue;
use crate::landcover::LandCoverProfile;
use crate::risk::{RiskClassification, RiskTier};
use crate::scenario::Scenario;
use chrono::NaiveDate;
use serde::Serialize;

/// Complete composed result for one (station, date, pollutant) query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StationAssessment {
    pub station_code: String,
    pub station_name: String,
    pub lon: f64,
    pub lat: f64,
    pub date: NaiveDate,
    pub pollutant: String,
    pub land_cover: LandCoverProfile,
    /// Urban vulnerability score of the dominant category (0 when no
    /// classification is available).
    pub vuci: u8,
    /// Demographic vulnerability percentage, absent when no breakdown is
    /// on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazard: Option<HazardReport>,
    pub risk: RiskReport,
    /// Human-readable note about the data backing this assessment.
    pub status: String,
}

/// Scenario in report format.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub code: String,
    pub label: String,
}

impl From<Scenario> for ScenarioReport {
    fn from(scenario: Scenario) -> Self {
        ScenarioReport {
            code: scenario.code().to_string(),
            label: scenario.label().to_string(),
        }
    }
}

/// Hazard value in report format.
#[derive(Debug, Clone, Serialize)]
pub struct HazardReport {
    pub value: f64,
    /// `observed` or `historical`.
    pub source: String,
}

impl From<HazardValue> for HazardReport {
    fn from(hazard: HazardValue) -> Self {
        HazardReport {
            value: hazard.value(),
            source: hazard.source().to_string(),
        }
    }
}

/// Risk classification in report format.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub tier: u8,
    pub caption: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_hazard: Option<f64>,
}

impl RiskReport {
    pub fn new(classification: RiskClassification) -> Self {
        RiskReport {
            tier: classification.tier.level(),
            caption: classification.tier.caption().to_string(),
            color: classification.tier.color_key().to_string(),
            weighted_hazard: classification.weighted_hazard,
        }
    }

    pub fn tier_enum(&self) -> RiskTier {
        match self.tier {
            1 => RiskTier::Low,
            2 => RiskTier::Medium,
            3 => RiskTier::High,
            _ => RiskTier::NoData,
        }
    }
}

/// Sort assessments deterministically: risk tier descending, weighted
/// hazard descending, station code ascending.
pub fn sort_assessments(mut assessments: Vec<StationAssessment>) -> Vec<StationAssessment> {
    assessments.sort_by(|a, b| {
        b.risk
            .tier
            .cmp(&a.risk.tier)
            .then_with(|| {
                let wa = a.risk.weighted_hazard.unwrap_or(f64::MIN);
                let wb = b.risk.weighted_hazard.unwrap_or(f64::MIN);
                wb.partial_cmp(&wa).unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.station_code.cmp(&b.station_code))
    });
    assessments
}

/// Render assessments as a fixed-width text table.
pub fn render_text(assessments: &[StationAssessment]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<9} {:<9} {:<5} {:<7} {:<9} {:<10} {}\n",
        "RISK", "WEIGHTED", "HAZARD", "VUCI", "CVP", "SCENARIO", "CODE", "STATION"
    ));

    for a in assessments {
        output.push_str(&format!(
            "{:<8} {:<9} {:<9} {:<5} {:<7} {:<9} {:<10} {}\n",
            a.risk.caption,
            opt_value(a.risk.weighted_hazard),
            opt_value(a.hazard.as_ref().map(|h| h.value)),
            a.vuci,
            opt_value(a.cvp),
            a.scenario.as_ref().map_or("-", |s| s.code.as_str()),
            a.station_code,
            a.station_name,
        ));
    }

    output
}

/// Render one assessment as a multi-line detail view.
pub fn render_detail(a: &StationAssessment) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Station:   {} ({})  [{:.4}, {:.4}]\n",
        a.station_name, a.station_code, a.lon, a.lat
    ));
    output.push_str(&format!("Date:      {}  Pollutant: {}\n", a.date, a.pollutant));
    output.push_str(&format!("Status:    {}\n", a.status));
    match a.land_cover.dominant {
        Some(lcz) => output.push_str(&format!(
            "Dominant:  LCZ {} ({})  VUCI: {}\n",
            lcz.code(),
            lcz.name(),
            a.vuci
        )),
        None => output.push_str(&format!("Dominant:  none  VUCI: {}\n", a.vuci)),
    }
    output.push_str(&format!("CVP:       {}\n", opt_value(a.cvp)));
    match &a.scenario {
        Some(s) => output.push_str(&format!("Scenario:  {} ({})\n", s.code, s.label)),
        None => output.push_str("Scenario:  unknown\n"),
    }
    match &a.hazard {
        Some(h) => output.push_str(&format!("Hazard:    {:.2} ({})\n", h.value, h.source)),
        None => output.push_str("Hazard:    unavailable\n"),
    }
    output.push_str(&format!(
        "Risk:      {} (tier {}, color {})",
        a.risk.caption, a.risk.tier, a.risk.color
    ));
    match a.risk.weighted_hazard {
        Some(w) => output.push_str(&format!(", weighted hazard {:.2}\n", w)),
        None => output.push('\n'),
    }

    let shares: Vec<_> = a
        .land_cover
        .percentages
        .iter()
        .filter(|(_, pct)| **pct > 0.0)
        .collect();
    if !shares.is_empty() {
        output.push_str("Land cover:\n");
        for (lcz, pct) in shares {
            output.push_str(&format!(
                "  {:<3} {:<22} {:>6.2}%\n",
                lcz.code(),
                lcz.name(),
                pct
            ));
        }
    }

    output
}

/// Render assessments as JSON output.
pub fn render_json(assessments: &[StationAssessment]) -> String {
    serde_json::to_string_pretty(assessments).unwrap_or_else(|_| "[]".to_string())
}

fn opt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(code: &str, tier: u8, weighted: Option<f64>) -> StationAssessment {
        StationAssessment {
            station_code: code.to_string(),
            station_name: format!("station {}", code),
            lon: 2.0,
            lat: 41.0,
            date: "2022-03-01".parse().unwrap(),
            pollutant: "NO2".to_string(),
            land_cover: LandCoverProfile::unavailable(),
            vuci: 0,
            cvp: None,
            scenario: None,
            hazard: None,
            risk: RiskReport {
                tier,
                caption: "x".to_string(),
                color: "x".to_string(),
                weighted_hazard: weighted,
            },
            status: String::new(),
        }
    }

    #[test]
    fn test_sort_by_tier_then_weighted_then_code() {
        let sorted = sort_assessments(vec![
            assessment("c", 2, Some(35.0)),
            assessment("b", 3, Some(41.0)),
            assessment("a", 2, Some(35.0)),
            assessment("d", 0, None),
            assessment("e", 3, Some(55.0)),
        ]);
        let codes: Vec<&str> = sorted.iter().map(|a| a.station_code.as_str()).collect();
        assert_eq!(codes, ["e", "b", "a", "c", "d"]);
    }

    #[test]
    fn test_render_text_has_header_and_rows() {
        let text = render_text(&[assessment("08101001", 2, Some(32.22))]);
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("RISK"));
        let row = lines.next().unwrap();
        assert!(row.contains("08101001"));
        assert!(row.contains("32.22"));
    }

    #[test]
    fn test_render_json_round_trips() {
        let json = render_json(&[assessment("08101001", 0, None)]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["station_code"], "08101001");
        assert_eq!(parsed[0]["risk"]["tier"], 0);
        // Unavailable fields are omitted, not emitted as null.
        assert!(parsed[0].get("cvp").is_none());
    }

    #[test]
    fn test_tier_enum_round_trip() {
        assert_eq!(assessment("a", 2, None).risk.tier_enum(), RiskTier::Medium);
        assert_eq!(assessment("a", 0, None).risk.tier_enum(), RiskTier::NoData);
    }
}
