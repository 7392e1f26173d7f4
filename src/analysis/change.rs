use crate::climate_db::Observation;
use serde::Serialize;

/// Arithmetic mean of the values in a series.
///
/// `None` when the series is empty; "no data" must never read as an average
/// of zero.
pub fn average(series: &[Observation]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }

    let sum: f64 = series.iter().map(|obs| obs.value).sum();
    Some(sum / series.len() as f64)
}

/// Percentage rate of change from `avg1` to `avg2`, relative to the magnitude
/// of `avg1`. Undefined at a zero baseline.
pub fn rate_of_change(avg1: f64, avg2: f64) -> Option<f64> {
    if avg1 == 0.0 {
        return None;
    }

    Some((avg2 - avg1) / avg1.abs() * 100.0)
}

/// Mean and supporting record count for one metric over one period.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PeriodSummary {
    pub mean: f64,
    pub records: usize,
}

impl PeriodSummary {
    pub fn of(series: &[Observation]) -> Option<Self> {
        average(series).map(|mean| PeriodSummary {
            mean,
            records: series.len(),
        })
    }
}

/// Period averages and the resulting percent change for one metric.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MetricChange {
    pub period1: PeriodSummary,
    pub period2: PeriodSummary,
    pub change_percent: f64,
}

impl MetricChange {
    /// `None` when either period lacks data or the baseline average is zero.
    pub fn between(
        period1: Option<PeriodSummary>,
        period2: Option<PeriodSummary>,
    ) -> Option<Self> {
        let period1 = period1?;
        let period2 = period2?;
        let change_percent = rate_of_change(period1.mean, period2.mean)?;

        Some(MetricChange {
            period1,
            period2,
            change_percent,
        })
    }
}

/// Both selected metrics' changes for one station. Only exists fully defined:
/// a station that cannot produce all four averages has no `StationChanges`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StationChanges {
    pub primary: MetricChange,
    pub secondary: MetricChange,
}

impl StationChanges {
    pub fn vector(&self) -> ChangeVector {
        ChangeVector {
            primary: self.primary.change_percent,
            secondary: self.secondary.change_percent,
        }
    }

    /// Total observations backing this station's four averages.
    pub fn total_records(&self) -> usize {
        self.primary.period1.records
            + self.primary.period2.records
            + self.secondary.period1.records
            + self.secondary.period2.records
    }
}

/// A station's (primary, secondary) percent-change pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChangeVector {
    pub primary: f64,
    pub secondary: f64,
}

impl ChangeVector {
    /// Euclidean distance to another change vector. Zero means the climates
    /// shifted identically; lower is more similar.
    pub fn distance_to(&self, other: &ChangeVector) -> f64 {
        let dp = self.primary - other.primary;
        let ds = self.secondary - other.secondary;

        (dp * dp + ds * ds).sqrt()
    }
}
