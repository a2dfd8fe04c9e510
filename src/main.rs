use std::env;
use std::fmt::Display;

use clap::ArgMatches;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use yansi::Paint;

use csvcharts::plot::{BoxPlot, GroupedBars, LinePlot};
use csvcharts::read::{TableReader, TableReaderBuilder};
use csvcharts::stats::GroupedSummaries;

#[macro_use]
extern crate log;

mod app;

/// Sets up color output and the logger.
fn configure_output(option: &str, verbose: bool) {
    let mut color_choice = ColorChoice::Auto;
    match option {
        "no" => {
            Paint::disable();
            color_choice = ColorChoice::Never;
        }
        "auto" => match env::var("TERM") {
            Ok(value) if value == "dumb" => {
                Paint::disable();
                color_choice = ColorChoice::Never;
            }
            _ => {
                if !atty::is(atty::Stream::Stdout) {
                    Paint::disable();
                    color_choice = ColorChoice::Never;
                }
            }
        },
        _ => (),
    };
    if let Err(err) = TermLogger::init(
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        ConfigBuilder::new()
            .set_time_level(LevelFilter::Trace)
            .set_thread_level(LevelFilter::Trace)
            .set_target_level(LevelFilter::Trace)
            .build(),
        TerminalMode::Stderr,
        color_choice,
    ) {
        eprintln!("[ERROR] Failed to initialize logger: {}", err);
    };
}

/// Logs `result`'s error, if any, and exits the program with exit code 1.
fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            error!("{}", error);
            std::process::exit(1);
        }
    }
}

fn exit_if_empty(empty: bool) {
    if empty {
        warn!("No data to process");
        std::process::exit(0);
    }
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

fn get_reader(matches: &ArgMatches) -> TableReader {
    let mut builder = TableReaderBuilder::default();
    if let Some(delimiter) = matches.get_one::<u8>("delimiter") {
        builder.delimiter(*delimiter);
    }
    builder.build().unwrap_or_default()
}

fn precision(matches: &ArgMatches) -> Option<usize> {
    matches.get_one::<usize>("precision").copied()
}

fn boxplot(matches: &ArgMatches) {
    let observations = or_exit(get_reader(matches).read_observations(
        arg(matches, "input"),
        arg(matches, "category"),
        arg(matches, "value"),
    ));
    exit_if_empty(observations.is_empty());
    let summaries = or_exit(GroupedSummaries::new(&observations));
    let width = matches.get_one::<usize>("width").copied().unwrap_or(80);
    print!(
        "{:width$}",
        BoxPlot::new(summaries, precision(matches)),
        width = width
    );
}

fn bars(matches: &ArgMatches) {
    let rows = or_exit(get_reader(matches).read_series(
        arg(matches, "input"),
        arg(matches, "group"),
        arg(matches, "series"),
        arg(matches, "value"),
    ));
    exit_if_empty(rows.is_empty());
    let bars = or_exit(GroupedBars::new(&rows, precision(matches)));
    let width = matches.get_one::<usize>("width").copied().unwrap_or(80);
    print!("{:width$}", bars, width = width);
}

fn line(matches: &ArgMatches) {
    let points = or_exit(get_reader(matches).read_observations(
        arg(matches, "input"),
        arg(matches, "category"),
        arg(matches, "value"),
    ));
    exit_if_empty(points.is_empty());
    let height = matches.get_one::<usize>("height").copied().unwrap_or(20);
    print!(
        "{}",
        or_exit(LinePlot::new(&points, height, precision(matches)))
    );
}

fn main() {
    let matches = app::get_app().get_matches();
    configure_output(
        arg(&matches, "color"),
        matches.get_one::<bool>("verbose").copied().unwrap_or(false),
    );
    match matches.subcommand() {
        Some(("box", subcommand_matches)) => boxplot(subcommand_matches),
        Some(("bars", subcommand_matches)) => bars(subcommand_matches),
        Some(("line", subcommand_matches)) => line(subcommand_matches),
        _ => unreachable!("Invalid subcommand"),
    };
}
