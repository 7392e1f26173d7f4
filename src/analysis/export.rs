use super::ranking::SimilarityAnalysis;
use crate::{
    climate_db::{Metric, Observation},
    error::ClimosimError,
};
use std::io::Write;

const RANKING_HEADER: [&str; 14] = [
    "Rank",
    "Station_ID",
    "Station_Name",
    "State",
    "Latitude",
    "Longitude",
    "Primary_Period1_Avg",
    "Primary_Period2_Avg",
    "Primary_Change_Percent",
    "Secondary_Period1_Avg",
    "Secondary_Period2_Avg",
    "Secondary_Change_Percent",
    "Similarity_Score",
    "Total_Records",
];

/// Flatten a ranking to CSV, one row per ranked station.
///
/// Rounding happens here and only here: coordinates to 4 decimal places,
/// averages and percent changes to 2, similarity scores to 3. The in-memory
/// results stay full precision.
pub fn write_ranking_csv<W: Write>(
    analysis: &SimilarityAnalysis,
    out: W,
) -> Result<(), ClimosimError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&RANKING_HEADER)?;

    for (i, entry) in analysis.similar.iter().enumerate() {
        let station = &entry.station;
        let changes = &entry.changes;

        writer.write_record(&[
            (i + 1).to_string(),
            station.site_id.to_string(),
            station.name.clone().unwrap_or_default(),
            station.state.clone().unwrap_or_default(),
            station
                .latitude
                .map(|v| format!("{:.4}", v))
                .unwrap_or_default(),
            station
                .longitude
                .map(|v| format!("{:.4}", v))
                .unwrap_or_default(),
            format!("{:.2}", changes.primary.period1.mean),
            format!("{:.2}", changes.primary.period2.mean),
            format!("{:.2}", changes.primary.change_percent),
            format!("{:.2}", changes.secondary.period1.mean),
            format!("{:.2}", changes.secondary.period2.mean),
            format!("{:.2}", changes.secondary.change_percent),
            format!("{:.3}", entry.similarity_score),
            changes.total_records().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Ranking CSV as an in-memory string.
pub fn ranking_to_csv(analysis: &SimilarityAnalysis) -> Result<String, ClimosimError> {
    let mut buf = Vec::new();
    write_ranking_csv(analysis, &mut buf)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Two-column CSV of one raw series: ISO date, metric value.
pub fn write_series_csv<W: Write>(
    metric: Metric,
    series: &[Observation],
    out: W,
) -> Result<(), ClimosimError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&["date", metric.code()])?;

    for obs in series {
        writer.write_record(&[
            obs.date.format("%Y-%m-%d").to_string(),
            obs.value.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Series CSV as an in-memory string.
pub fn series_to_csv(metric: Metric, series: &[Observation]) -> Result<String, ClimosimError> {
    let mut buf = Vec::new();
    write_series_csv(metric, series, &mut buf)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
