//! End-to-end checks against a real archive file in a temporary directory.

use climosim::{
    find_similar_stations, ranking_to_csv, ClimateDb, ClimateQueryInterface, ClimosimError,
    RawRequest, SimilarityAnalysis,
};
use rusqlite::{params, Connection, NO_PARAMS};
use tempfile::TempDir;

const SCHEMA: &str = "
CREATE TABLE weather_station (
    site_id INTEGER PRIMARY KEY,
    name TEXT,
    latitude REAL,
    longitude REAL,
    state TEXT,
    region TEXT
);
CREATE TABLE weather_data (
    location INTEGER,
    dmy TEXT,
    precipitation REAL,
    PrecipQual TEXT,
    MaxTemp REAL,
    MaxTempQual TEXT,
    PRIMARY KEY (location, dmy),
    FOREIGN KEY (location) REFERENCES weather_station(site_id)
);
";

/// Station 1 is the reference: precipitation 10 -> 12 (+20%) and max
/// temperature 50 -> 45 (-10%) between January 2000 and January 2010.
fn build_archive() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");

    let conn = Connection::open(ClimateDb::path_to_db(dir.path())).expect("create db");
    conn.execute_batch(SCHEMA).expect("schema");

    add_station(&conn, 1, "ALPHA", "VIC");
    add_station(&conn, 2, "BRAVO", "WA");
    add_station(&conn, 3, "CHARLIE", "NSW");
    add_station(&conn, 4, "DELTA", "VIC");
    add_station(&conn, 5, "ECHO", "NT");
    add_station(&conn, 6, "FOXTROT", "QLD");
    add_station(&conn, 7, "GOLF", "NSW");

    // Reference.
    add_days(&conn, 1, "2000-01", 10.0, 50.0);
    add_days(&conn, 1, "2010-01", 12.0, 45.0);

    // NULL and blank values must not drag the reference averages around.
    conn.execute(
        "INSERT INTO weather_data (location, dmy, precipitation, PrecipQual, MaxTemp, MaxTempQual)
         VALUES (1, '2000-01-28', NULL, NULL, NULL, NULL)",
        NO_PARAMS,
    )
    .expect("null row");
    conn.execute(
        "INSERT INTO weather_data (location, dmy, precipitation, PrecipQual, MaxTemp, MaxTempQual)
         VALUES (1, '2000-01-29', '', '', '', '')",
        NO_PARAMS,
    )
    .expect("blank row");

    // Identical change vector: scores 0.0 and ranks first.
    add_days(&conn, 2, "2000-01", 10.0, 50.0);
    add_days(&conn, 2, "2010-01", 12.0, 45.0);

    // (+30%, -10%): distance 10 from the reference.
    add_days(&conn, 3, "2000-01", 10.0, 50.0);
    add_days(&conn, 3, "2010-01", 13.0, 45.0);

    // (+15%, -5%): distance sqrt(50).
    add_days(&conn, 4, "2000-01", 10.0, 50.0);
    add_days(&conn, 4, "2010-01", 11.5, 47.5);

    // Zero precipitation baseline: rate of change undefined, never ranked.
    add_days(&conn, 5, "2000-01", 0.0, 50.0);
    add_days(&conn, 5, "2010-01", 12.0, 45.0);

    // No data at all in the second period: never ranked.
    add_days(&conn, 6, "2000-01", 10.0, 50.0);

    // Observations only on the period boundary dates; the closed interval
    // must keep them, making this station identical to the reference too.
    for (dmy, precip, maxtemp) in &[
        ("2000-01-01", 10.0, 50.0),
        ("2000-01-31", 10.0, 50.0),
        ("2010-01-01", 12.0, 45.0),
        ("2010-01-31", 12.0, 45.0),
    ] {
        conn.execute(
            "INSERT INTO weather_data (location, dmy, precipitation, PrecipQual, MaxTemp, MaxTempQual)
             VALUES (7, ?1, ?2, 'Y', ?3, 'Y')",
            params![dmy, precip, maxtemp],
        )
        .expect("boundary row");
    }

    dir
}

fn add_station(conn: &Connection, site_id: i64, name: &str, state: &str) {
    conn.execute(
        "INSERT INTO weather_station (site_id, name, latitude, longitude, state, region)
         VALUES (?1, ?2, ?3, ?4, ?5, 'SOUTHERN')",
        params![site_id, name, -37.0 + site_id as f64 * 0.1, 144.8321, state],
    )
    .expect("station");
}

fn add_days(conn: &Connection, site_id: i64, month: &str, precip: f64, maxtemp: f64) {
    for day in &["10", "11", "12"] {
        conn.execute(
            "INSERT INTO weather_data (location, dmy, precipitation, PrecipQual, MaxTemp, MaxTempQual)
             VALUES (?1, ?2, ?3, 'Y', ?4, 'Y')",
            params![site_id, format!("{}-{}", month, day), precip, maxtemp],
        )
        .expect("data row");
    }
}

fn raw_request(count: &str) -> RawRequest {
    RawRequest {
        reference_station: Some("1".to_string()),
        primary_metric: Some("precipitation".to_string()),
        secondary_metric: Some("maxtemp".to_string()),
        period1_start: Some("2000-01-01".to_string()),
        period1_end: Some("2000-01-31".to_string()),
        period2_start: Some("2010-01-01".to_string()),
        period2_end: Some("2010-01-31".to_string()),
        num_stations: Some(count.to_string()),
    }
}

fn run_ranking(root: &TempDir, raw: &RawRequest) -> Result<SimilarityAnalysis, ClimosimError> {
    let request = raw.parse()?;

    let climate_db = ClimateDb::connect(root.path())?;
    let mut queries = ClimateQueryInterface::initialize(&climate_db)?;

    find_similar_stations(&mut queries, &request)
}

#[test]
fn ranks_candidates_by_change_vector_distance() {
    let dir = build_archive();
    let analysis = run_ranking(&dir, &raw_request("10")).unwrap();

    let reference = &analysis.reference.changes;
    assert!((reference.primary.change_percent - 20.0).abs() < 1e-9);
    assert!((reference.secondary.change_percent + 10.0).abs() < 1e-9);

    let ids: Vec<i64> = analysis
        .similar
        .iter()
        .map(|entry| entry.station.site_id)
        .collect();

    // Equal scores fall back to name order (BRAVO before GOLF).
    assert_eq!(ids, vec![2, 7, 4, 3]);

    assert_eq!(analysis.similar[0].similarity_score, 0.0);
    assert_eq!(analysis.similar[1].similarity_score, 0.0);
    assert!((analysis.similar[2].similarity_score - 50f64.sqrt()).abs() < 1e-9);
    assert!((analysis.similar[3].similarity_score - 10.0).abs() < 1e-9);

    // The reference never ranks itself, and data-poor candidates are absent
    // rather than carrying placeholder scores.
    assert!(!ids.contains(&1));
    assert!(!ids.contains(&5));
    assert!(!ids.contains(&6));

    for pair in analysis.similar.windows(2) {
        assert!(pair[0].similarity_score <= pair[1].similarity_score);
    }
}

#[test]
fn truncates_to_the_requested_count() {
    let dir = build_archive();
    let analysis = run_ranking(&dir, &raw_request("2")).unwrap();

    let ids: Vec<i64> = analysis
        .similar
        .iter()
        .map(|entry| entry.station.site_id)
        .collect();
    assert_eq!(ids, vec![2, 7]);
}

#[test]
fn unknown_reference_station_is_reported() {
    let dir = build_archive();

    let mut raw = raw_request("5");
    raw.reference_station = Some("99".to_string());

    match run_ranking(&dir, &raw) {
        Err(ClimosimError::StationNotFound(99)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn reference_without_data_in_both_periods_is_reported() {
    let dir = build_archive();

    let mut raw = raw_request("5");
    raw.reference_station = Some("6".to_string());

    match run_ranking(&dir, &raw) {
        Err(ClimosimError::InsufficientReferenceData(6)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn empty_period_is_rejected_before_any_query() {
    // No database anywhere in sight: validation alone must reject this.
    let mut raw = raw_request("5");
    raw.period1_end = raw.period1_start.clone();

    match raw.parse() {
        Err(ClimosimError::InvalidPeriod { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn csv_export_round_trips_order_and_rounded_values() {
    let dir = build_archive();
    let analysis = run_ranking(&dir, &raw_request("10")).unwrap();

    let text = ranking_to_csv(&analysis).unwrap();
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let rows: Vec<csv::StringRecord> = reader.records().map(|record| record.unwrap()).collect();
    assert_eq!(rows.len(), analysis.similar.len());

    let ids: Vec<&str> = rows.iter().map(|row| &row[1]).collect();
    assert_eq!(ids, vec!["2", "7", "4", "3"]);

    let scores: Vec<&str> = rows.iter().map(|row| &row[12]).collect();
    assert_eq!(scores, vec!["0.000", "0.000", "7.071", "10.000"]);

    // First row is BRAVO with the reference's own change profile.
    assert_eq!(&rows[0][2], "BRAVO");
    assert_eq!(&rows[0][6], "10.00");
    assert_eq!(&rows[0][7], "12.00");
    assert_eq!(&rows[0][8], "20.00");
    assert_eq!(&rows[0][11], "-10.00");
    assert_eq!(&rows[0][13], "12");
}

#[test]
fn station_listing_is_ordered_by_state_then_name() {
    let dir = build_archive();

    let climate_db = ClimateDb::connect(dir.path()).unwrap();
    let mut queries = ClimateQueryInterface::initialize(&climate_db).unwrap();

    let ids: Vec<i64> = queries
        .stations()
        .unwrap()
        .iter()
        .map(|station| station.site_id)
        .collect();
    assert_eq!(ids, vec![3, 7, 5, 6, 1, 4, 2]);
}

#[test]
fn loaded_series_is_ascending_and_skips_unusable_values() {
    let dir = build_archive();

    let climate_db = ClimateDb::connect(dir.path()).unwrap();
    let mut queries = ClimateQueryInterface::initialize(&climate_db).unwrap();

    let raw = raw_request("5");
    let request = raw.parse().unwrap();
    let series = queries
        .load_series(1, request.primary_metric, &request.period1)
        .unwrap();

    // The NULL and blank rows on the 28th and 29th are filtered out.
    assert_eq!(series.len(), 3);
    for pair in series.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    for obs in &series {
        assert_eq!(obs.value, 10.0);
        assert_eq!(obs.quality.as_deref(), Some("Y"));
    }
}

#[test]
fn json_structure_carries_reference_similar_and_parameters() {
    let dir = build_archive();
    let analysis = run_ranking(&dir, &raw_request("1")).unwrap();

    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(value["reference"]["station"]["site_id"], 1);
    assert_eq!(value["parameters"]["primary_metric"], "precipitation");
    assert_eq!(value["parameters"]["period1"]["start"], "2000-01-01");
    assert_eq!(value["similar"][0]["station"]["site_id"], 2);
    assert_eq!(value["similar"][0]["similarity_score"], 0.0);
}
