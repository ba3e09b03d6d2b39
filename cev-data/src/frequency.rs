use crate::stats;
use cev_ensemble::time_fields::TimeFields;
use cev_ensemble::EnsembleError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Frequency shown when the dashboard first opens.
pub const DEFAULT_FREQUENCY: Frequency = Frequency::Annual;

/// Years a decade bucket needs to be kept when it is the last one.
pub const YEARS_PER_DECADE: usize = 10;

/// Temporal bucket size of the shaded series.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize)]
pub enum Frequency {
    /// Native cadence: one point per table row.
    Monthly,
    /// One point per calendar year.
    #[default]
    Annual,
    /// One point per decade (1990 = 1990..=1999).
    Decadal,
}

pub const FREQUENCY_OPTIONS: [Frequency; 3] =
    [Frequency::Monthly, Frequency::Annual, Frequency::Decadal];

impl Frequency {
    /// Bucket key of a row, or `None` when rows are not grouped.
    pub fn bucket(&self, fields: &TimeFields) -> Option<i32> {
        match self {
            Frequency::Monthly => None,
            Frequency::Annual => Some(fields.year),
            Frequency::Decadal => Some(fields.decade()),
        }
    }
}

impl FromStr for Frequency {
    type Err = EnsembleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "annual" => Ok(Frequency::Annual),
            "decadal" => Ok(Frequency::Decadal),
            _ => Err(EnsembleError::InvalidFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Annual => write!(f, "Annual"),
            Frequency::Decadal => write!(f, "Decadal"),
        }
    }
}

/// How one member's readings are collapsed inside a yearly or decadal bucket.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Reducer {
    Mean,
    Min,
    Max,
}

impl Reducer {
    /// Extreme-temperature records keep their extreme; everything else is averaged.
    pub fn for_variable(variable: &str) -> Reducer {
        match variable {
            "TREFHTMN" => Reducer::Min,
            "TREFHTMX" => Reducer::Max,
            _ => Reducer::Mean,
        }
    }

    pub fn reduce<I: IntoIterator<Item = f64>>(&self, values: I) -> f64 {
        match self {
            Reducer::Mean => stats::mean(values),
            Reducer::Min => stats::min(values),
            Reducer::Max => stats::max(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequency() {
        assert_eq!("Monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("annual".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!(" Decadal ".parse::<Frequency>().unwrap(), Frequency::Decadal);
        assert!(matches!(
            "Weekly".parse::<Frequency>(),
            Err(EnsembleError::InvalidFrequency(f)) if f == "Weekly"
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for frequency in FREQUENCY_OPTIONS {
            assert_eq!(frequency.to_string().parse::<Frequency>().unwrap(), frequency);
        }
    }

    #[test]
    fn test_bucket_keys() {
        let fields = TimeFields {
            year: 2017,
            month: 3,
            day: 15,
            hour: 0,
        };
        assert_eq!(Frequency::Monthly.bucket(&fields), None);
        assert_eq!(Frequency::Annual.bucket(&fields), Some(2017));
        assert_eq!(Frequency::Decadal.bucket(&fields), Some(2010));
    }

    #[test]
    fn test_reducer_for_variable() {
        assert_eq!(Reducer::for_variable("TREFHTMN"), Reducer::Min);
        assert_eq!(Reducer::for_variable("TREFHTMX"), Reducer::Max);
        assert_eq!(Reducer::for_variable("PRECT"), Reducer::Mean);
        // only the exact names pick an extreme
        assert_eq!(Reducer::for_variable("TREFHT"), Reducer::Mean);
    }

    #[test]
    fn test_reduce() {
        let values = [4.0, 1.0, 7.0];
        assert_eq!(Reducer::Mean.reduce(values), 4.0);
        assert_eq!(Reducer::Min.reduce(values), 1.0);
        assert_eq!(Reducer::Max.reduce(values), 7.0);
    }
}
