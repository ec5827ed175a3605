//! Assessment orchestration - ties together land cover, demographics,
//! scenario, hazard, and risk for one station-day query.

use crate::demographics::{self, CvpMode};
use crate::error::Error;
use crate::hazard::{self, HazardValue};
use crate::landcover::{self, LandCoverProfile};
use crate::lcz;
use crate::readings::{DayRecord, ReadingStore};
use crate::report::{HazardReport, RiskReport, ScenarioReport, StationAssessment};
use crate::risk::{self, RiskThresholds};
use crate::scenario;
use crate::station::{Station, StationRegistry};
use chrono::NaiveDate;
use log::warn;

/// Knobs shared by every assessment in a run.
#[derive(Debug, Clone, Copy)]
pub struct AssessOptions<'a> {
    pub cvp_mode: CvpMode,
    pub thresholds: &'a RiskThresholds,
    /// Label of the reference year backing the historical fallback.
    pub reference_year: &'a str,
}

/// Outcome of the day-record lookup feeding one assessment.
#[derive(Debug, Clone, Copy)]
pub enum DayData<'a> {
    /// At most one record matched the query key.
    Found(Option<&'a DayRecord>),
    /// Duplicate records upstream; the hazard is withheld rather than
    /// averaged away.
    Inconsistent,
}

/// Assess one station-day from already-resolved inputs.
///
/// Total over its inputs: per-station data gaps become explicit
/// unavailable markers in the result, never panics or escaping errors.
pub fn assess_station(
    station: &Station,
    date: NaiveDate,
    pollutant: &str,
    day: DayData<'_>,
    options: &AssessOptions<'_>,
) -> StationAssessment {
    let pollutant_name = crate::pollutant::canonical_name(pollutant)
        .map_or_else(|| pollutant.to_string(), str::to_string);

    let land_cover = match landcover::classify(station.land_cover.as_ref()) {
        Ok(profile) => profile,
        Err(e) => {
            warn!("station {}: {}", station.code, e);
            LandCoverProfile::unavailable()
        }
    };
    let vuci = lcz::vuci_or_default(land_cover.dominant);

    let cvp = match demographics::cvp(station.demographics.as_ref(), options.cvp_mode) {
        Ok(value) => value,
        Err(e) => {
            warn!("station {}: {}", station.code, e);
            None
        }
    };

    let scenario = scenario::classify(f64::from(vuci), cvp);

    let (hazard, observed) = match day {
        DayData::Found(record) => {
            let readings = record.map(DayRecord::readings);
            let hazard = hazard::resolve(readings.as_ref(), station.annual_mean(&pollutant_name));
            let observed = matches!(hazard, Some(HazardValue::Observed(_)));
            (hazard, observed)
        }
        DayData::Inconsistent => (None, false),
    };

    let classification = risk::classify_with_thresholds(
        hazard.map(HazardValue::value),
        f64::from(vuci),
        cvp,
        options.thresholds,
    );

    let status = status_line(station, date, &pollutant_name, day, observed, hazard, options);

    StationAssessment {
        station_code: station.code.clone(),
        station_name: station.name.clone(),
        lon: station.lon,
        lat: station.lat,
        date,
        pollutant: pollutant_name,
        land_cover,
        vuci,
        cvp,
        scenario: scenario.map(ScenarioReport::from),
        hazard: hazard.map(HazardReport::from),
        risk: RiskReport::new(classification),
        status,
    }
}

/// Assess the unique station matching a query key.
///
/// An unknown station code is `MissingData`; duplicate day-records are
/// `InconsistentData`, surfaced instead of silently resolved.
pub fn assess_query(
    registry: &StationRegistry,
    store: &ReadingStore,
    station_code: &str,
    date: NaiveDate,
    pollutant: &str,
    options: &AssessOptions<'_>,
) -> Result<StationAssessment, Error> {
    let station = registry
        .get(station_code)
        .ok_or_else(|| Error::MissingData(format!("unknown station code: {}", station_code)))?;
    let record = store.find(station_code, date, pollutant)?;
    Ok(assess_station(
        station,
        date,
        pollutant,
        DayData::Found(record),
        options,
    ))
}

/// Assess every station in the registry for one date and pollutant, in
/// registry order.
///
/// A station with duplicate day-records is kept in the result with the
/// inconsistency flagged in its status and a withheld hazard, so one bad
/// upstream key cannot sink the whole sweep.
pub fn assess_all(
    registry: &StationRegistry,
    store: &ReadingStore,
    date: NaiveDate,
    pollutant: &str,
    options: &AssessOptions<'_>,
) -> Vec<StationAssessment> {
    registry
        .iter()
        .map(|station| {
            let day = match store.find(&station.code, date, pollutant) {
                Ok(record) => DayData::Found(record),
                Err(e) => {
                    warn!("{}", e);
                    DayData::Inconsistent
                }
            };
            assess_station(station, date, pollutant, day, options)
        })
        .collect()
}

fn status_line(
    station: &Station,
    date: NaiveDate,
    pollutant: &str,
    day: DayData<'_>,
    observed: bool,
    hazard: Option<HazardValue>,
    options: &AssessOptions<'_>,
) -> String {
    match day {
        DayData::Inconsistent => format!(
            "Inconsistent {} data for {} on {}",
            pollutant, station.name, date
        ),
        DayData::Found(_) if observed => format!(
            "{} for station {} ({}) on {}",
            pollutant, station.name, station.code, date
        ),
        DayData::Found(_) => match hazard {
            Some(HazardValue::Historical(_)) => format!(
                "No {} readings for {} on {}. Using the {} reference mean.",
                pollutant, station.name, date, options.reference_year
            ),
            _ => format!("No {} data for {} on {}.", pollutant, station.name, date),
        },
    }
}
