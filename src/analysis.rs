pub use self::{
    change::{average, rate_of_change, ChangeVector, MetricChange, PeriodSummary, StationChanges},
    export::{ranking_to_csv, series_to_csv, write_ranking_csv, write_series_csv},
    ranking::{find_similar_stations, ReferenceSummary, SimilarStation, SimilarityAnalysis},
    request::{AnalysisRequest, Period, RawRequest, SeriesRequest, DEFAULT_RESULT_COUNT},
};

mod change;
mod export;
mod ranking;
mod request;
