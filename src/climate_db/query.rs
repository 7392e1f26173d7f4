use super::{ClimateDb, Metric, Observation, Station};
use crate::{analysis::Period, error::ClimosimError};
use log::trace;
use rusqlite::{params, Row, Statement, NO_PARAMS};

/// This struct creates and caches several statements for querying the database.
///
/// Statements for the fixed station queries are prepared up front; the series
/// statement is prepared once per metric the first time that metric is asked
/// for, since the metric selects the column being read.
pub struct ClimateQueryInterface<'a, 'b: 'a> {
    climate_db: &'b ClimateDb,
    station_statement: Statement<'a>,
    candidates_statement: Statement<'a>,
    listing_statement: Statement<'a>,
    series_statements: Vec<(Metric, Statement<'a>)>,
}

impl<'a, 'b> ClimateQueryInterface<'a, 'b> {
    /// Initialize the interface.
    pub fn initialize(climate_db: &'b ClimateDb) -> Result<Self, ClimosimError> {
        let conn = &climate_db.conn;
        let station_statement = conn.prepare(include_str!("sql/station_by_id.sql"))?;
        let candidates_statement = conn.prepare(include_str!("sql/candidate_stations.sql"))?;
        let listing_statement = conn.prepare(include_str!("sql/station_listing.sql"))?;

        Ok(ClimateQueryInterface {
            climate_db,
            station_statement,
            candidates_statement,
            listing_statement,
            series_statements: Vec::with_capacity(Metric::NUM_VARIANTS),
        })
    }

    /// Look up a single station by its site id.
    pub fn station(&mut self, site_id: i64) -> Result<Option<Station>, ClimosimError> {
        let mut rows = self
            .station_statement
            .query_map(params![site_id], row_to_station)?;

        Ok(rows.next().transpose()?)
    }

    /// Every station except the given one, ordered by name then site id so the
    /// ranking's tie-break order is stable across runs.
    pub fn candidates(&mut self, reference: i64) -> Result<Vec<Station>, ClimosimError> {
        let stations: Result<Vec<Station>, _> = self
            .candidates_statement
            .query_map(params![reference], row_to_station)?
            .collect();
        let stations = stations?;

        Ok(stations)
    }

    /// Every station in the archive, in state/name listing order.
    pub fn stations(&mut self) -> Result<Vec<Station>, ClimosimError> {
        let stations: Result<Vec<Station>, _> = self
            .listing_statement
            .query_map(NO_PARAMS, row_to_station)?
            .collect();
        let stations = stations?;

        Ok(stations)
    }

    /// Retrieve one station's observations of `metric` inside `period`,
    /// ascending by date. Rows with a NULL or blank value are excluded here,
    /// so an empty result means "no usable data", never an error.
    pub fn load_series(
        &mut self,
        site_id: i64,
        metric: Metric,
        period: &Period,
    ) -> Result<Vec<Observation>, ClimosimError> {
        let statement = self.series_statement(metric)?;

        let series: Result<Vec<Observation>, _> = statement
            .query_map(params![site_id, period.start(), period.end()], |row| {
                Ok(Observation {
                    date: row.get(0)?,
                    value: row.get(1)?,
                    quality: row.get(2)?,
                })
            })?
            .collect();
        let series = series?;

        trace!(
            "loaded {} {} observations for station {} in {} to {}",
            series.len(),
            metric,
            site_id,
            period.start(),
            period.end()
        );

        Ok(series)
    }

    fn series_statement(&mut self, metric: Metric) -> Result<&mut Statement<'a>, ClimosimError> {
        let idx = match self
            .series_statements
            .iter()
            .position(|(cached, _)| *cached == metric)
        {
            Some(idx) => idx,
            None => {
                let sql = format!(
                    include_str!("sql/period_series.sql"),
                    metric.code(),
                    metric.quality_column()
                );
                let statement = self.climate_db.conn.prepare(&sql)?;
                self.series_statements.push((metric, statement));
                self.series_statements.len() - 1
            }
        };

        Ok(&mut self.series_statements[idx].1)
    }
}

fn row_to_station(row: &Row) -> rusqlite::Result<Station> {
    Ok(Station {
        site_id: row.get(0)?,
        name: row.get(1)?,
        state: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
    })
}
