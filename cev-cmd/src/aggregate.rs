//! Run one aggregation request against an ensemble CSV.

use anyhow::Context;
use cev_data::{aggregate, AggregationRequest, ShadedData};
use cev_ensemble::loader::load_path;
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SERIES_FILE: &str = "series.csv";
pub const MONTHLY_FILE: &str = "monthly.csv";
pub const MONTHLY_REFERENCE_FILE: &str = "monthly_reference.csv";

/// Where the aggregated tables go.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Three CSV files in this directory.
    Directory(PathBuf),
    /// One JSON document on stdout.
    Json,
}

/// Load `input`, aggregate it per `request` and write the result.
pub fn run_aggregate(input: &Path, request: &AggregationRequest, output: &Output) -> anyhow::Result<()> {
    let table = load_path(input).with_context(|| format!("Failed to load {}", input.display()))?;

    info!(
        "Calculating {} average for {} (ensemble {}) over {} rows",
        request.frequency,
        request.variable,
        request.ensemble,
        table.len()
    );
    if let Some(range) = request.year_range {
        info!("{}", range.seasonal_cycle_title());
    }

    let data = aggregate(&table, request)?;

    match output {
        Output::Directory(dir) => {
            let written = write_csv_tables(&data, dir)?;
            for path in written {
                info!("Wrote {}", path.display());
            }
        }
        Output::Json => {
            let stdout = std::io::stdout();
            write_json(&data, stdout.lock())?;
        }
    }
    Ok(())
}

/// Write the series and both climatologies as CSV files in `dir`.
///
/// Returns the paths written, series first.
pub fn write_csv_tables(data: &ShadedData, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let series = dir.join(SERIES_FILE);
    let monthly = dir.join(MONTHLY_FILE);
    let monthly_reference = dir.join(MONTHLY_REFERENCE_FILE);
    write_rows(&series, &data.series)?;
    write_rows(&monthly, &data.monthly)?;
    write_rows(&monthly_reference, &data.monthly_reference)?;
    Ok(vec![series, monthly, monthly_reference])
}

/// Write the whole result as pretty-printed JSON. Missing values become `null`.
pub fn write_json<W: Write>(data: &ShadedData, mut writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, data)?;
    writeln!(writer)?;
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
