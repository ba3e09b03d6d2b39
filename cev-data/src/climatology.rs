//! Seasonal cycle: the average of each calendar month across years.

use crate::models::{MonthlyMean, SeriesPoint};
use crate::stats;
use cev_ensemble::year_range::YearRange;
use cev_utils::dates::month_abbr;

/// Average `points` per calendar month, optionally only inside `window`.
///
/// Always returns twelve rows, January first. A month without any point
/// carries NaN values.
pub fn monthly_climatology(points: &[SeriesPoint], window: Option<YearRange>) -> Vec<MonthlyMean> {
    (1..=12u32)
        .map(|month| {
            let rows = points
                .iter()
                .filter(|p| p.month == month)
                .filter(|p| window.map_or(true, |w| w.contains(p.year)))
                .collect::<Vec<_>>();
            MonthlyMean {
                month,
                value: stats::mean(rows.iter().map(|p| p.value)),
                value_lower: stats::mean(rows.iter().map(|p| p.value_lower)),
                value_upper: stats::mean(rows.iter().map(|p| p.value_upper)),
                month_label: month_abbr(month).unwrap_or_default().to_string(),
            }
        })
        .collect()
}
