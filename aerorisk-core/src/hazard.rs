//! Hazard value aggregation
//!
//! Reduces a station-day's hourly pollutant readings to one representative
//! concentration, with a historical fallback when the day has no data.

use crate::round2;
use serde::Serialize;

/// Number of hourly slots in one station-day.
pub const HOURS: usize = 24;

/// Up to 24 hourly concentration values for one station-day, hours
/// labeled 1-24. Absent hours are missing measurements, not zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyReadings {
    values: [Option<f64>; HOURS],
}

impl HourlyReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value for an hour (1-24). Out-of-range hours are
    /// rejected.
    pub fn insert(&mut self, hour: usize, value: f64) -> bool {
        if !(1..=HOURS).contains(&hour) {
            return false;
        }
        self.values[hour - 1] = Some(value);
        true
    }

    pub fn get(&self, hour: usize) -> Option<f64> {
        if (1..=HOURS).contains(&hour) {
            self.values[hour - 1]
        } else {
            None
        }
    }

    /// Number of hours with a measurement.
    pub fn present(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.present() == 0
    }

    /// Arithmetic mean of the present values, ignoring absent hours,
    /// 2-decimal rounding. `None` when no hour has a measurement.
    pub fn mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in self.values.iter().flatten() {
            sum += value;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(round2(sum / count as f64))
        }
    }

    /// The 24 hourly slots with absent hours as 0.0, for chart-style
    /// rendering.
    pub fn series(&self) -> [f64; HOURS] {
        let mut out = [0.0; HOURS];
        for (slot, value) in out.iter_mut().zip(self.values.iter()) {
            if let Some(v) = value {
                *slot = *v;
            }
        }
        out
    }
}

/// A hazard value together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum HazardValue {
    /// Daily mean of observed hourly readings.
    Observed(f64),
    /// Reference-year annual mean substituted for a day without data.
    Historical(f64),
}

impl HazardValue {
    pub fn value(self) -> f64 {
        match self {
            HazardValue::Observed(v) | HazardValue::Historical(v) => v,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            HazardValue::Observed(_) => "observed",
            HazardValue::Historical(_) => "historical",
        }
    }
}

/// Resolve the hazard value for a station-day: the observed daily mean
/// when any hourly value is present, else the historical fallback, else
/// unavailable.
pub fn resolve(readings: Option<&HourlyReadings>, historical: Option<f64>) -> Option<HazardValue> {
    if let Some(mean) = readings.and_then(HourlyReadings::mean) {
        return Some(HazardValue::Observed(mean));
    }
    historical.map(|v| HazardValue::Historical(round2(v)))
}
