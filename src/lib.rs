//! climosim
//!
//! Library for querying a pre-built SQLite archive of Australian daily climate
//! observations and ranking weather stations by how similarly their climate
//! has shifted between two date ranges.
//!

//
// Public API
//
pub use crate::{
    analysis::{
        average, find_similar_stations, ranking_to_csv, rate_of_change, series_to_csv,
        write_ranking_csv, write_series_csv, AnalysisRequest, ChangeVector, MetricChange, Period,
        PeriodSummary, RawRequest, ReferenceSummary, SeriesRequest, SimilarStation,
        SimilarityAnalysis, StationChanges, DEFAULT_RESULT_COUNT,
    },
    climate_db::{ClimateDb, ClimateQueryInterface, Metric, Observation, Station},
    error::ClimosimError,
};

//
// Private implementation.
//
mod analysis;
mod climate_db;
mod error;
