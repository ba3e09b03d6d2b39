//! CSV loading for ensemble tables.
//!
//! The expected file has a header row with a `time` column and one column
//! per `{VARIABLE}_{member}`:
//!
//! ```text
//! time,TREFHTMN_0,TREFHTMN_1,PRECT_0,PRECT_1
//! 1850-01-16 12:00:00,261.2,262.0,2.1e-8,1.9e-8
//! ```
//!
//! Blank cells and `NaN` are read as missing values. Calendar columns
//! (`year`, `month`, `day`, `hour`) and unnamed index columns written by
//! dataframe exports are skipped; the calendar fields are re-derived from
//! `time`.

use crate::error::{EnsembleError, Result};
use crate::table::{Column, RawTable, WideTable, TIME_COLUMN};
use cev_utils::dates::parse_timestamp;
use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Source columns that are derived from `time` and therefore not loaded.
pub const DERIVED_COLUMNS: [&str; 5] = ["year", "month", "day", "hour", "decade"];

fn is_skipped_column(name: &str) -> bool {
    name.is_empty() || name.starts_with("Unnamed") || DERIVED_COLUMNS.contains(&name)
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

impl RawTable {
    /// Parse an ensemble CSV from a string slice.
    pub fn from_csv_str(csv_data: &str) -> Result<RawTable> {
        RawTable::from_reader(csv_data.as_bytes())
    }

    /// Parse an ensemble CSV from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<RawTable> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let time_index = headers
            .iter()
            .position(|h| h == TIME_COLUMN)
            .ok_or(EnsembleError::MissingTimeColumn)?;

        let mut kept: Vec<(usize, Column)> = Vec::new();
        for (index, name) in headers.iter().enumerate() {
            if index == time_index {
                continue;
            }
            if is_skipped_column(name) {
                log::debug!("[CEV Debug] loader: skipping column '{}'", name);
                continue;
            }
            kept.push((index, Column::new(name, Vec::new())));
        }

        let mut times = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            let raw_time = record.get(time_index).unwrap_or("");
            let time = parse_timestamp(raw_time).map_err(|_| EnsembleError::UnparseableTimestamp {
                row,
                value: raw_time.to_string(),
            })?;
            times.push(time);

            for (index, column) in kept.iter_mut() {
                let cell = record.get(*index).unwrap_or("");
                let value = parse_cell(cell).ok_or_else(|| EnsembleError::InvalidValue {
                    row,
                    column: column.name.clone(),
                    value: cell.to_string(),
                })?;
                column.values.push(value);
            }
        }

        let columns = kept.into_iter().map(|(_, column)| column).collect::<Vec<_>>();
        log::info!(
            "[CEV Debug] loader: Loaded {} rows, {} member columns",
            times.len(),
            columns.len()
        );
        Ok(RawTable { times, columns })
    }
}

/// Read, normalize and validate an ensemble CSV file.
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<WideTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    log::info!(
        "[CEV Debug] loader: reading {}{}",
        path.display(),
        if is_gzip { " (gzip)" } else { "" }
    );
    let raw = if is_gzip {
        RawTable::from_reader(GzDecoder::new(BufReader::new(file)))?
    } else {
        RawTable::from_reader(BufReader::new(file))?
    };
    raw.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const CSV_DATA: &str = "\
,time,TREFHTMN_0,TREFHTMN_1,PRECT_0,year,month
0,2000-01-16 12:00:00,273.15,274.15,1.0,2000,1
1,2000-02-15 00:00:00,263.15,,0.0,2000,2
2,2000-03-16 12:00:00,253.15,NaN,2.0,2000,3
";

    #[test]
    fn from_csv_str_skips_index_and_calendar_columns() {
        let raw = RawTable::from_csv_str(CSV_DATA).unwrap();
        assert_eq!(raw.times.len(), 3);
        let names: Vec<&str> = raw.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["TREFHTMN_0", "TREFHTMN_1", "PRECT_0"]);
        assert_eq!(raw.columns[0].values, vec![273.15, 263.15, 253.15]);
    }

    #[test]
    fn blank_and_nan_cells_are_missing() {
        let raw = RawTable::from_csv_str(CSV_DATA).unwrap();
        assert_eq!(raw.columns[1].values[0], 274.15);
        assert!(raw.columns[1].values[1].is_nan());
        assert!(raw.columns[1].values[2].is_nan());
    }

    #[test]
    fn normalized_load_converts_units() {
        let table = RawTable::from_csv_str(CSV_DATA).unwrap().normalize().unwrap();
        assert_eq!(table.column("TREFHTMN_0").unwrap().values[0], 32.0);
        assert_eq!(table.column("PRECT_0").unwrap().values[0], 1242399685.04 / 12.0);
        assert_eq!(table.fields()[2].month, 3);
    }

    #[test]
    fn missing_time_column() {
        let result = RawTable::from_csv_str("date,PRECT_0\n2000-01-01,1.0\n");
        assert!(matches!(result, Err(EnsembleError::MissingTimeColumn)));
    }

    #[test]
    fn unparseable_timestamp_reports_row() {
        let csv = "time,PRECT_0\n2000-01-01,1.0\nsoon,2.0\n";
        let result = RawTable::from_csv_str(csv);
        assert!(matches!(
            result,
            Err(EnsembleError::UnparseableTimestamp { row: 1, ref value }) if value == "soon"
        ));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let csv = "time,PRECT_0\n2000-01-01,wet\n";
        let result = RawTable::from_csv_str(csv);
        assert!(matches!(
            result,
            Err(EnsembleError::InvalidValue { row: 0, ref column, .. }) if column == "PRECT_0"
        ));
    }

    #[test]
    fn infinite_cells_are_values() {
        let raw = RawTable::from_csv_str("time,SOIL_0,SOIL_1\n2000-01-15,inf,-infinity\n").unwrap();
        assert_eq!(raw.columns[0].values, vec![f64::INFINITY]);
        assert_eq!(raw.columns[1].values, vec![f64::NEG_INFINITY]);
    }

    #[test]
    fn gzip_reader_round_trip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(CSV_DATA.as_bytes()).unwrap();
        let bytes = encoder.finish().unwrap();
        let raw = RawTable::from_reader(GzDecoder::new(bytes.as_slice())).unwrap();
        let plain = RawTable::from_csv_str(CSV_DATA).unwrap();
        assert_eq!(raw.times, plain.times);
        assert_eq!(raw.columns.len(), plain.columns.len());
        assert_eq!(raw.columns[2], plain.columns[2]);
    }

    #[test]
    fn load_path_reads_plain_and_gzip_files() {
        let dir = std::env::temp_dir().join(format!("cev-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let plain = dir.join("ensemble.csv");
        std::fs::write(&plain, CSV_DATA).unwrap();

        let gz = dir.join("ensemble.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(CSV_DATA.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let from_plain = load_path(&plain).unwrap();
        let from_gz = load_path(&gz).unwrap();
        assert_eq!(from_plain.len(), 3);
        assert_eq!(from_plain.times(), from_gz.times());
        assert_eq!(
            from_plain.column("TREFHTMN_0").unwrap().values,
            from_gz.column("TREFHTMN_0").unwrap().values
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_path_missing_file_is_io_error() {
        let result = load_path("/nonexistent/cev/ensemble.csv");
        assert!(matches!(result, Err(EnsembleError::Io(_))));
    }
}
