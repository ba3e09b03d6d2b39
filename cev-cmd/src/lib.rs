//! Command implementations for the CEV CLI.
//!
//! Provides subcommands for aggregating an ensemble CSV into chart-ready
//! tables and for inspecting which variables and members a file holds.

use cev_data::AggregationRequest;
use cev_ensemble::variable::DEFAULT_VARIABLE;
use cev_ensemble::year_range::{YearRange, REFERENCE_WINDOW};
use clap::Subcommand;
use std::path::PathBuf;

pub mod aggregate;
pub mod inspect;

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate one variable into a shaded series and monthly climatologies
    Aggregate {
        /// Path to the ensemble CSV (a `.gz` suffix is decompressed)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Variable name, matched as a substring of the member columns
        #[arg(short = 'v', long, default_value = DEFAULT_VARIABLE)]
        variable: String,

        /// "Average" for the whole ensemble, or a single member id
        #[arg(short = 'e', long, default_value = "Average")]
        ensemble: String,

        /// Monthly, Annual or Decadal
        #[arg(short = 'f', long, default_value = "Annual")]
        frequency: String,

        /// First year of a range selection (inclusive)
        #[arg(long, requires = "end_year")]
        start_year: Option<i32>,

        /// Last year of a range selection (inclusive)
        #[arg(long, requires = "start_year")]
        end_year: Option<i32>,

        /// First year of the reference climatology
        #[arg(long, default_value_t = REFERENCE_WINDOW.start())]
        reference_start: i32,

        /// Last year of the reference climatology
        #[arg(long, default_value_t = REFERENCE_WINDOW.end())]
        reference_end: i32,

        /// Directory for series.csv, monthly.csv and monthly_reference.csv
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,

        /// Print one JSON document to stdout instead of writing CSV files
        #[arg(long, conflicts_with = "output_dir")]
        json: bool,
    },

    /// List the variables, members and years in an ensemble CSV
    Inspect {
        /// Path to the ensemble CSV (a `.gz` suffix is decompressed)
        #[arg(short = 'i', long)]
        input: PathBuf,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Aggregate {
            input,
            variable,
            ensemble,
            frequency,
            start_year,
            end_year,
            reference_start,
            reference_end,
            output_dir,
            json,
        } => {
            let year_range = match (start_year, end_year) {
                (Some(start), Some(end)) => Some(YearRange::new(start, end)?),
                _ => None,
            };
            let request = AggregationRequest::parse(&variable, &ensemble, &frequency)?
                .with_reference_window(YearRange::new(reference_start, reference_end)?)
                .with_year_range(year_range);
            let output = if json {
                aggregate::Output::Json
            } else {
                aggregate::Output::Directory(output_dir)
            };
            aggregate::run_aggregate(&input, &request, &output)
        }
        Command::Inspect { input } => inspect::run_inspect(&input),
    }
}
