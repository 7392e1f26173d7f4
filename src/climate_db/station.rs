use chrono::NaiveDate;
use serde::Serialize;

/// A weather observation site from the `weather_station` table.
#[derive(Clone, Debug, Serialize)]
pub struct Station {
    pub site_id: i64,
    pub name: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One recorded value of one metric at one station on one day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    /// Bureau quality flag, where the source data carried one.
    pub quality: Option<String>,
}
