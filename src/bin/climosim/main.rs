//! climosim
//!
//! Query an archive of Australian daily climate observations and rank weather
//! stations by how similarly their climate has shifted between two date
//! ranges. The archive is a pre-built `climate.db` SQLite file; this tool only
//! ever reads it.
mod report;

use climosim::{Metric, RawRequest};
use std::{error::Error, path::PathBuf};
use strum::IntoEnumIterator;

fn main() {
    if let Err(e) = run() {
        println!("error: {}", e);

        let mut err = &*e;

        while let Some(cause) = err.source() {
            println!("caused by: {}", cause);
            err = cause;
        }

        ::std::process::exit(1);
    }
}

pub fn bail(msg: &str) -> ! {
    println!("{}", msg);
    ::std::process::exit(1);
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;

    match args.operation.as_ref() {
        "rank" => report::rank(args),
        "export" => report::export(args),
        "series" => report::series(args),
        "stations" => report::stations(args),
        "metrics" => report::metrics(args),
        _ => bail("Unknown operation."),
    }
}

#[derive(Debug)]
pub(crate) struct CmdLineArgs {
    root: PathBuf,
    operation: String,
    request: RawRequest,
    json: bool,
    output: Option<PathBuf>,
}

fn parse_args() -> Result<CmdLineArgs, Box<dyn Error>> {
    let metric_codes: Vec<&str> = Metric::iter().map(Metric::code).collect();

    let app = clap::App::new("climosim")
        .version(clap::crate_version!())
        .about("Weather station climate-shift similarity reports.")
        .arg(
            clap::Arg::with_name("station")
                .short("s")
                .long("station")
                .takes_value(true)
                .help("Reference station site id (e.g. 86038)."),
        )
        .arg(
            clap::Arg::with_name("primary")
                .short("p")
                .long("primary")
                .takes_value(true)
                .possible_values(&metric_codes)
                .help("Primary climate metric."),
        )
        .arg(
            clap::Arg::with_name("secondary")
                .long("secondary")
                .takes_value(true)
                .possible_values(&metric_codes)
                .help("Secondary climate metric.")
                .long_help(concat!(
                    "Secondary climate metric.",
                    " Must differ from the primary metric."
                )),
        )
        .arg(
            clap::Arg::with_name("period1")
                .long("period1")
                .number_of_values(2)
                .value_names(&["START", "END"])
                .help("First averaging period as two YYYY-MM-DD dates."),
        )
        .arg(
            clap::Arg::with_name("period2")
                .long("period2")
                .number_of_values(2)
                .value_names(&["START", "END"])
                .help("Second averaging period as two YYYY-MM-DD dates."),
        )
        .arg(
            clap::Arg::with_name("count")
                .short("n")
                .long("count")
                .takes_value(true)
                .default_value("5")
                .help("How many similar stations to report."),
        )
        .arg(
            clap::Arg::with_name("json")
                .long("json")
                .help("Emit the full result structure as JSON."),
        )
        .arg(
            clap::Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Write CSV output to this file instead of stdout."),
        )
        .arg(
            clap::Arg::with_name("root")
                .short("r")
                .long("root")
                .takes_value(true)
                .help("Set the directory containing climate.db.")
                .long_help(
                    "Set the directory containing the climate.db archive you are invoking this command for.",
                )
                .global(true),
        )
        .arg(
            clap::Arg::with_name("operation")
                .index(1)
                .takes_value(true)
                .required(true)
                .possible_values(&["rank", "export", "series", "stations", "metrics"])
                .help("Which report to produce.")
                .long_help(concat!(
                    "Which report to produce. 'rank' prints the most similar stations,",
                    " 'export' writes the same ranking as CSV, 'series' dumps one",
                    " station/metric series as CSV, 'stations' and 'metrics' list what",
                    " the archive can be asked about.",
                )),
        );

    let matches = app.get_matches();

    let root = matches
        .value_of("root")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .expect("Invalid root.");

    let mut request = RawRequest::default();
    request.reference_station = matches.value_of("station").map(str::to_owned);
    request.primary_metric = matches.value_of("primary").map(str::to_owned);
    request.secondary_metric = matches.value_of("secondary").map(str::to_owned);
    if let Some(mut values) = matches.values_of("period1") {
        request.period1_start = values.next().map(str::to_owned);
        request.period1_end = values.next().map(str::to_owned);
    }
    if let Some(mut values) = matches.values_of("period2") {
        request.period2_start = values.next().map(str::to_owned);
        request.period2_end = values.next().map(str::to_owned);
    }
    request.num_stations = matches.value_of("count").map(str::to_owned);

    let operation: String = matches.value_of("operation").map(str::to_owned).unwrap();

    Ok(CmdLineArgs {
        root,
        operation,
        request,
        json: matches.is_present("json"),
        output: matches.value_of("output").map(PathBuf::from),
    })
}
