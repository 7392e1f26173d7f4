use crate::CmdLineArgs;
use climosim::{
    find_similar_stations, write_ranking_csv, write_series_csv, ClimateDb, ClimateQueryInterface,
    ClimosimError, Metric, SimilarityAnalysis,
};
use std::{
    error::Error,
    fs::File,
    io::{self, BufWriter},
};
use strum::IntoEnumIterator;

pub(crate) fn rank(args: CmdLineArgs) -> Result<(), Box<dyn Error>> {
    let analysis = run_analysis(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_report(&analysis);

    Ok(())
}

pub(crate) fn export(args: CmdLineArgs) -> Result<(), Box<dyn Error>> {
    let analysis = run_analysis(&args)?;

    match &args.output {
        Some(path) => {
            let out = BufWriter::new(File::create(path)?);
            write_ranking_csv(&analysis, out)?;
        }
        None => {
            let stdout = io::stdout();
            write_ranking_csv(&analysis, stdout.lock())?;
        }
    }

    Ok(())
}

pub(crate) fn series(args: CmdLineArgs) -> Result<(), Box<dyn Error>> {
    let request = args.request.parse_series()?;

    let climate_db = ClimateDb::connect(&args.root)?;
    let mut queries = ClimateQueryInterface::initialize(&climate_db)?;
    let series = queries.load_series(request.station, request.metric, &request.period)?;

    match &args.output {
        Some(path) => {
            let out = BufWriter::new(File::create(path)?);
            write_series_csv(request.metric, &series, out)?;
        }
        None => {
            let stdout = io::stdout();
            write_series_csv(request.metric, &series, stdout.lock())?;
        }
    }

    Ok(())
}

pub(crate) fn stations(args: CmdLineArgs) -> Result<(), Box<dyn Error>> {
    let climate_db = ClimateDb::connect(&args.root)?;
    let mut queries = ClimateQueryInterface::initialize(&climate_db)?;

    for station in queries.stations()? {
        println!(
            "{:>8}  {:<8} {}",
            station.site_id,
            station.state.as_deref().unwrap_or(""),
            station.name.as_deref().unwrap_or("(unnamed)"),
        );
    }

    Ok(())
}

pub(crate) fn metrics(_args: CmdLineArgs) -> Result<(), Box<dyn Error>> {
    for metric in Metric::iter() {
        println!("{:<16} {}", metric.code(), metric.display_name());
    }

    Ok(())
}

fn run_analysis(args: &CmdLineArgs) -> Result<SimilarityAnalysis, ClimosimError> {
    let request = args.request.parse()?;

    let climate_db = ClimateDb::connect(&args.root)?;
    let mut queries = ClimateQueryInterface::initialize(&climate_db)?;

    find_similar_stations(&mut queries, &request)
}

fn print_report(analysis: &SimilarityAnalysis) {
    let params = &analysis.parameters;
    let reference = &analysis.reference;

    println!(
        "Reference station {} - {}",
        reference.station.site_id,
        reference.station.name.as_deref().unwrap_or("(unnamed)"),
    );
    println!(
        "  {:<28} {:>+8.2}%  ({:.2} -> {:.2})",
        params.primary_metric.display_name(),
        reference.changes.primary.change_percent,
        reference.changes.primary.period1.mean,
        reference.changes.primary.period2.mean,
    );
    println!(
        "  {:<28} {:>+8.2}%  ({:.2} -> {:.2})",
        params.secondary_metric.display_name(),
        reference.changes.secondary.change_percent,
        reference.changes.secondary.period1.mean,
        reference.changes.secondary.period2.mean,
    );
    println!(
        "Periods: {} to {} vs {} to {}",
        params.period1.start(),
        params.period1.end(),
        params.period2.start(),
        params.period2.end(),
    );
    println!();

    if analysis.similar.is_empty() {
        println!("No other station has enough data in both periods.");
        return;
    }

    println!(
        "{:>4} {:>8} {:<28} {:<6} {:>10} {:>12} {:>10}",
        "rank", "site", "name", "state", "primary %", "secondary %", "score",
    );
    for (i, entry) in analysis.similar.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:<28} {:<6} {:>+10.2} {:>+12.2} {:>10.3}",
            i + 1,
            entry.station.site_id,
            entry.station.name.as_deref().unwrap_or(""),
            entry.station.state.as_deref().unwrap_or(""),
            entry.changes.primary.change_percent,
            entry.changes.secondary.change_percent,
            entry.similarity_score,
        );
    }
}
