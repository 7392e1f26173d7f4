use super::{
    change::{MetricChange, PeriodSummary, StationChanges},
    request::{AnalysisRequest, Period},
};
use crate::{
    climate_db::{ClimateQueryInterface, Metric, Station},
    error::ClimosimError,
};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

/// The reference station's side of a completed analysis.
#[derive(Clone, Debug, Serialize)]
pub struct ReferenceSummary {
    pub station: Station,
    pub changes: StationChanges,
}

/// One ranked candidate station.
#[derive(Clone, Debug, Serialize)]
pub struct SimilarStation {
    pub station: Station,
    pub changes: StationChanges,
    pub similarity_score: f64,
}

/// Everything a caller needs to render or export one similarity request.
#[derive(Clone, Debug, Serialize)]
pub struct SimilarityAnalysis {
    pub reference: ReferenceSummary,
    pub similar: Vec<SimilarStation>,
    pub parameters: AnalysisRequest,
}

/// Rank every other station by how closely its change vector matches the
/// reference station's.
///
/// Candidates that cannot produce a fully defined change vector are dropped
/// from the ranking, never given a placeholder score. A reference station
/// that cannot produce one fails the whole request instead.
pub fn find_similar_stations(
    queries: &mut ClimateQueryInterface,
    request: &AnalysisRequest,
) -> Result<SimilarityAnalysis, ClimosimError> {
    let reference = queries
        .station(request.reference_station)?
        .ok_or(ClimosimError::StationNotFound(request.reference_station))?;

    let ref_changes = station_changes(queries, request.reference_station, request)?.ok_or(
        ClimosimError::InsufficientReferenceData(request.reference_station),
    )?;
    let ref_vector = ref_changes.vector();

    let candidates = queries.candidates(request.reference_station)?;

    let mut ranked = Vec::new();
    for station in candidates {
        let changes = match station_changes(queries, station.site_id, request)? {
            Some(changes) => changes,
            None => {
                debug!(
                    "dropping station {} from the ranking: insufficient data",
                    station.site_id
                );
                continue;
            }
        };

        let similarity_score = ref_vector.distance_to(&changes.vector());
        ranked.push(SimilarStation {
            station,
            changes,
            similarity_score,
        });
    }

    // Stable sort, so equal scores keep the name/site-id enumeration order.
    ranked.sort_by(|a, b| {
        a.similarity_score
            .partial_cmp(&b.similarity_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(request.max_results);

    Ok(SimilarityAnalysis {
        reference: ReferenceSummary {
            station: reference,
            changes: ref_changes,
        },
        similar: ranked,
        parameters: *request,
    })
}

/// One station's change statistics, or `None` when any of the four period
/// averages is missing or either metric's baseline is zero.
fn station_changes(
    queries: &mut ClimateQueryInterface,
    site_id: i64,
    request: &AnalysisRequest,
) -> Result<Option<StationChanges>, ClimosimError> {
    let primary = metric_change(
        queries,
        site_id,
        request.primary_metric,
        &request.period1,
        &request.period2,
    )?;
    let secondary = metric_change(
        queries,
        site_id,
        request.secondary_metric,
        &request.period1,
        &request.period2,
    )?;

    Ok(match (primary, secondary) {
        (Some(primary), Some(secondary)) => Some(StationChanges { primary, secondary }),
        _ => None,
    })
}

fn metric_change(
    queries: &mut ClimateQueryInterface,
    site_id: i64,
    metric: Metric,
    period1: &Period,
    period2: &Period,
) -> Result<Option<MetricChange>, ClimosimError> {
    let series1 = queries.load_series(site_id, metric, period1)?;
    let series2 = queries.load_series(site_id, metric, period2)?;

    Ok(MetricChange::between(
        PeriodSummary::of(&series1),
        PeriodSummary::of(&series2),
    ))
}
