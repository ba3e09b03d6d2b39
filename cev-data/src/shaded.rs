//! The aggregation engine behind the shaded time-series chart.
//!
//! Contract of [`aggregate`]:
//!
//! - Columns are picked by case-sensitive substring match on the variable,
//!   then narrowed by the ensemble selector. A member id keeps exactly the
//!   column `{variable}_{id}`; it is never silently averaged.
//! - `Monthly` returns one point per table row: the mean over the selected
//!   columns, bracketed by their minimum and maximum.
//! - `Annual` and `Decadal` first collapse each member inside the bucket
//!   (minimum for `TREFHTMN`, maximum for `TREFHTMX`, mean otherwise), then
//!   take mean/min/max across members. Each bucket is stamped June 30th of
//!   its first year; for decades that is `decade-06-30`.
//! - The last decade is dropped when it holds fewer than ten distinct years.
//!   Earlier decades are kept as they are.
//! - Both climatologies average the per-row series by calendar month; the
//!   reference one only uses rows inside the request's reference window.
//!
//! The engine is pure: no I/O, no logging, no shared state.

use crate::climatology::monthly_climatology;
use crate::frequency::{Frequency, Reducer, YEARS_PER_DECADE};
use crate::models::{SeriesPoint, ShadedData};
use crate::request::AggregationRequest;
use crate::stats;
use cev_ensemble::{Column, Result, WideTable};
use cev_utils::dates::mid_year_timestamp;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

/// Month stamped on yearly and decadal points.
pub const REPRESENTATIVE_MONTH: u32 = 6;

/// Answer one request from `table`.
pub fn aggregate(table: &WideTable, request: &AggregationRequest) -> Result<ShadedData> {
    let table = match request.year_range {
        Some(range) => Cow::Owned(table.restrict_years(range)?),
        None => Cow::Borrowed(table),
    };
    let columns = request.ensemble.select(&table, &request.variable)?;

    let per_row = row_series(&table, &columns);
    let series = match request.frequency {
        Frequency::Monthly => per_row.clone(),
        frequency => bucket_series(
            &table,
            &columns,
            frequency,
            Reducer::for_variable(&request.variable),
        )?,
    };
    let monthly = monthly_climatology(&per_row, None);
    let monthly_reference = monthly_climatology(&per_row, Some(request.reference_window));

    Ok(ShadedData {
        series,
        monthly,
        monthly_reference,
    })
}

/// String-level entry point taking the dashboard's menu values.
///
/// `ensemble` is `"Average"` or a member id, `frequency` one of
/// `Monthly`, `Annual`, `Decadal`.
pub fn get_shaded_data(
    table: &WideTable,
    variable: &str,
    ensemble: &str,
    frequency: &str,
) -> Result<ShadedData> {
    let request = AggregationRequest::parse(variable, ensemble, frequency)?;
    aggregate(table, &request)
}

fn row_series(table: &WideTable, columns: &[&Column]) -> Vec<SeriesPoint> {
    table
        .times()
        .iter()
        .zip(table.fields())
        .enumerate()
        .map(|(row, (time, fields))| {
            let members = columns.iter().map(|c| c.values[row]).collect::<Vec<_>>();
            let band = stats::band(&members);
            SeriesPoint {
                time: *time,
                year: fields.year,
                month: fields.month,
                value: band.value,
                value_lower: band.lower,
                value_upper: band.upper,
            }
        })
        .collect()
}

fn bucket_series(
    table: &WideTable,
    columns: &[&Column],
    frequency: Frequency,
    reducer: Reducer,
) -> Result<Vec<SeriesPoint>> {
    let mut buckets: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (row, fields) in table.fields().iter().enumerate() {
        if let Some(key) = frequency.bucket(fields) {
            buckets.entry(key).or_default().push(row);
        }
    }
    if frequency == Frequency::Decadal {
        drop_partial_last_decade(table, &mut buckets);
    }

    buckets
        .iter()
        .map(|(&key, rows)| {
            let per_member = columns
                .iter()
                .map(|c| reducer.reduce(rows.iter().map(|&row| c.values[row])))
                .collect::<Vec<_>>();
            let band = stats::band(&per_member);
            Ok(SeriesPoint {
                time: mid_year_timestamp(key)?,
                year: key,
                month: REPRESENTATIVE_MONTH,
                value: band.value,
                value_lower: band.lower,
                value_upper: band.upper,
            })
        })
        .collect()
}

fn drop_partial_last_decade(table: &WideTable, buckets: &mut BTreeMap<i32, Vec<usize>>) {
    let partial = buckets.iter().next_back().and_then(|(&key, rows)| {
        let years = rows
            .iter()
            .map(|&row| table.fields()[row].year)
            .collect::<BTreeSet<_>>();
        (years.len() < YEARS_PER_DECADE).then_some(key)
    });
    if let Some(key) = partial {
        buckets.remove(&key);
    }
}
