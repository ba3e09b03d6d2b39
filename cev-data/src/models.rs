//! Output rows handed to the display layer.
//!
//! All structs derive `Serialize` so they can be written as CSV rows or as
//! one JSON document.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One point of the shaded time series.
///
/// `value` is the ensemble mean (or the selected member) and
/// `value_lower`/`value_upper` the member minimum and maximum, which the
/// chart draws as the uncertainty band.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    /// Row timestamp, or the representative June 30th of a yearly/decadal bucket.
    pub time: NaiveDateTime,
    /// Calendar year, or the first year of the decade.
    pub year: i32,
    pub month: u32,
    pub value: f64,
    pub value_lower: f64,
    pub value_upper: f64,
}

/// One calendar month of a seasonal cycle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyMean {
    /// Calendar month, 1 = January.
    pub month: u32,
    pub value: f64,
    pub value_lower: f64,
    pub value_upper: f64,
    /// Three-letter month name ("Jan").
    pub month_label: String,
}

/// The three tables produced by one aggregation request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShadedData {
    /// Shaded series at the requested frequency.
    pub series: Vec<SeriesPoint>,
    /// Seasonal cycle over every row.
    pub monthly: Vec<MonthlyMean>,
    /// Seasonal cycle over the reference window only.
    pub monthly_reference: Vec<MonthlyMean>,
}
