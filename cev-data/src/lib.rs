//! Aggregation of ensemble tables into chart-ready series.
//!
//! This crate turns an immutable [`cev_ensemble::WideTable`] into the three
//! tables the dashboard draws: a shaded time series at the chosen
//! frequency, the seasonal cycle over the whole record and the seasonal
//! cycle over the reference window. See [`shaded::aggregate`].

pub mod climatology;
pub mod frequency;
pub mod models;
pub mod request;
pub mod shaded;

pub use frequency::Frequency;
pub use models::{MonthlyMean, SeriesPoint, ShadedData};
pub use request::AggregationRequest;
pub use shaded::{aggregate, get_shaded_data};

/// Missing-value aware statistics over ensemble members.
///
/// NaN inputs are skipped and infinities propagate; an input with nothing
/// but NaN yields NaN.
pub mod stats {
    /// A central value with its lower and upper bound.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Band {
        pub value: f64,
        pub lower: f64,
        pub upper: f64,
    }

    pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
        let (sum, count) = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    pub fn min<I: IntoIterator<Item = f64>>(values: I) -> f64 {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
            .unwrap_or(f64::NAN)
    }

    pub fn max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
            .unwrap_or(f64::NAN)
    }

    /// Mean of `values` bracketed by their minimum and maximum.
    pub fn band(values: &[f64]) -> Band {
        let lower = min(values.iter().copied());
        let upper = max(values.iter().copied());
        let value = mean(values.iter().copied());
        if value.is_nan() {
            return Band { value, lower, upper };
        }
        // summation rounding can leave the mean an ulp outside [lower, upper]
        Band {
            value: value.clamp(lower, upper),
            lower,
            upper,
        }
    }

}
