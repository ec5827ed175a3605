//! Core error taxonomy
//!
//! Classification components are total functions returning
//! result-or-sentinel values; these errors cover the two data conditions
//! that must be surfaced explicitly rather than folded into a sentinel.

/// Errors surfaced by the classification core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A station has no breakdown on file, or a denominator that must be
    /// positive (total buffer area, total population) is zero.
    #[error("missing data: {0}")]
    MissingData(String),

    /// The readings provider returned more than one record for a
    /// supposedly unique (station, date, pollutant) key.
    #[error("inconsistent data: {0}")]
    InconsistentData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
