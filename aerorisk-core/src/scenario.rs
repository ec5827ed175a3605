//! Combined vulnerability scenarios
//!
//! Maps the (urban, demographic) vulnerability pair to one of six
//! scenario tiers through a fixed 2D threshold table.

use serde::Serialize;

/// Combined VUCI/CVP vulnerability scenario.
///
/// Ordered from most to least vulnerable: A1 > A2 > B >= C1, C2 > D, with
/// C1 and C2 sharing a rank (urban-driven vs demographic-driven).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scenario {
    A1,
    A2,
    B,
    C1,
    C2,
    D,
}

impl Scenario {
    /// The scenario code as published in assessments.
    pub fn code(self) -> &'static str {
        match self {
            Scenario::A1 => "A1",
            Scenario::A2 => "A2",
            Scenario::B => "B",
            Scenario::C1 => "C1",
            Scenario::C2 => "C2",
            Scenario::D => "D",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::A1 => "extremely vulnerable",
            Scenario::A2 => "highly vulnerable",
            Scenario::B => "vulnerable",
            Scenario::C1 => "vulnerable urban / low demographic",
            Scenario::C2 => "low urban / vulnerable demographic",
            Scenario::D => "low vulnerability",
        }
    }

    /// Ordinal vulnerability rank, 0 (least) to 4 (most). C1 and C2 share
    /// rank 1.
    pub fn rank(self) -> u8 {
        match self {
            Scenario::D => 0,
            Scenario::C1 | Scenario::C2 => 1,
            Scenario::B => 2,
            Scenario::A2 => 3,
            Scenario::A1 => 4,
        }
    }
}

/// Classify the (vuci, cvp) pair.
///
/// Both axes use strict `<` against the 50/60/70 thresholds. An
/// unavailable CVP yields `None` ("scenario unknown") rather than riding
/// NaN comparisons into an arbitrary branch.
pub fn classify(vuci: f64, cvp: Option<f64>) -> Option<Scenario> {
    let cvp = cvp?;
    let scenario = if vuci < 50.0 {
        if cvp < 50.0 {
            Scenario::D
        } else {
            Scenario::C2
        }
    } else if vuci < 60.0 {
        if cvp < 50.0 {
            Scenario::C1
        } else {
            Scenario::B
        }
    } else if vuci < 70.0 {
        if cvp < 50.0 {
            Scenario::C1
        } else if cvp < 60.0 {
            Scenario::B
        } else {
            Scenario::A2
        }
    } else if cvp < 50.0 {
        Scenario::C1
    } else if cvp < 60.0 {
        Scenario::B
    } else if cvp < 70.0 {
        Scenario::A2
    } else {
        Scenario::A1
    };
    Some(scenario)
}
