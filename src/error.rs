use chrono::NaiveDate;
use thiserror::Error;

/// Anything that can go wrong while answering a similarity request.
///
/// Validation and lookup variants abort a request outright; per-candidate data
/// shortfalls never surface here, they only remove the candidate from the
/// ranking.
#[derive(Debug, Error)]
pub enum ClimosimError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid station identifier: {0}")]
    InvalidStationId(String),

    #[error("unknown climate metric: {0}")]
    UnknownMetric(String),

    #[error("primary and secondary metrics must be different")]
    IdenticalMetrics,

    #[error("invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("end date must be later than start date: {start} to {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("invalid number of stations to rank: {0}")]
    InvalidResultCount(String),

    #[error("reference station not found: {0}")]
    StationNotFound(i64),

    #[error("insufficient data for reference station {0}")]
    InsufficientReferenceData(i64),

    #[error("climate database error")]
    Database(#[from] rusqlite::Error),

    #[error("failed to serialize results")]
    Export(#[from] csv::Error),

    #[error("failed to write results")]
    Io(#[from] std::io::Error),
}
