use crate::{climate_db::Metric, error::ClimosimError};
use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

/// How many similar stations a request returns when the caller does not say.
pub const DEFAULT_RESULT_COUNT: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A closed date interval used as an averaging window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// The end must be strictly later than the start. Nothing here relates one
    /// period to another: a request's second period may precede or overlap its
    /// first.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ClimosimError> {
        if end <= start {
            return Err(ClimosimError::InvalidPeriod { start, end });
        }

        Ok(Period { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    fn parse(start: &str, end: &str) -> Result<Self, ClimosimError> {
        Period::new(parse_date(start)?, parse_date(end)?)
    }
}

/// Request parameters as they arrive from the outside: all optional, all text.
///
/// `parse` turns this into an [`AnalysisRequest`] exactly once; nothing past
/// the boundary handles raw strings again.
#[derive(Clone, Debug, Default)]
pub struct RawRequest {
    pub reference_station: Option<String>,
    pub primary_metric: Option<String>,
    pub secondary_metric: Option<String>,
    pub period1_start: Option<String>,
    pub period1_end: Option<String>,
    pub period2_start: Option<String>,
    pub period2_end: Option<String>,
    pub num_stations: Option<String>,
}

impl RawRequest {
    /// Validate everything a similarity ranking needs.
    pub fn parse(&self) -> Result<AnalysisRequest, ClimosimError> {
        let reference = require(&self.reference_station, "reference_station")?;
        let primary = require(&self.primary_metric, "primary_metric")?;
        let secondary = require(&self.secondary_metric, "secondary_metric")?;
        let p1_start = require(&self.period1_start, "period1_start")?;
        let p1_end = require(&self.period1_end, "period1_end")?;
        let p2_start = require(&self.period2_start, "period2_start")?;
        let p2_end = require(&self.period2_end, "period2_end")?;

        let reference_station = parse_station_id(reference)?;

        let primary_metric = parse_metric(primary)?;
        let secondary_metric = parse_metric(secondary)?;
        if primary_metric == secondary_metric {
            return Err(ClimosimError::IdenticalMetrics);
        }

        let period1 = Period::parse(p1_start, p1_end)?;
        let period2 = Period::parse(p2_start, p2_end)?;

        let max_results = match self.num_stations.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_RESULT_COUNT,
            Some(text) => match text.parse::<usize>() {
                Ok(count) if count >= 1 => count,
                _ => return Err(ClimosimError::InvalidResultCount(text.to_string())),
            },
        };

        Ok(AnalysisRequest {
            reference_station,
            primary_metric,
            secondary_metric,
            period1,
            period2,
            max_results,
        })
    }

    /// Validate the subset of fields a single-series dump needs: the station,
    /// the primary metric, and the first period.
    pub fn parse_series(&self) -> Result<SeriesRequest, ClimosimError> {
        let reference = require(&self.reference_station, "reference_station")?;
        let primary = require(&self.primary_metric, "primary_metric")?;
        let p1_start = require(&self.period1_start, "period1_start")?;
        let p1_end = require(&self.period1_end, "period1_end")?;

        Ok(SeriesRequest {
            station: parse_station_id(reference)?,
            metric: parse_metric(primary)?,
            period: Period::parse(p1_start, p1_end)?,
        })
    }
}

/// A fully validated similarity request.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnalysisRequest {
    pub reference_station: i64,
    pub primary_metric: Metric,
    pub secondary_metric: Metric,
    pub period1: Period,
    pub period2: Period,
    pub max_results: usize,
}

/// A fully validated single-series request.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SeriesRequest {
    pub station: i64,
    pub metric: Metric,
    pub period: Period,
}

fn require<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, ClimosimError> {
    match field.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ClimosimError::MissingParameter(name)),
    }
}

fn parse_station_id(text: &str) -> Result<i64, ClimosimError> {
    text.parse::<i64>()
        .map_err(|_| ClimosimError::InvalidStationId(text.to_string()))
}

fn parse_metric(code: &str) -> Result<Metric, ClimosimError> {
    Metric::from_str(code).map_err(|_| ClimosimError::UnknownMetric(code.to_string()))
}

fn parse_date(text: &str) -> Result<NaiveDate, ClimosimError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ClimosimError::InvalidDate(text.to_string()))
}
