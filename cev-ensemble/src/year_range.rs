use crate::error::{EnsembleError, Result};
use std::fmt;

/// Baseline period of the reference climatology: 2000 through 2020.
pub const REFERENCE_WINDOW: YearRange = YearRange {
    start: 2000,
    end: 2020,
};

/// An inclusive range of calendar years, e.g. a reference window or the
/// span picked by a range selection on the time-series chart.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<YearRange> {
        if start > end {
            return Err(EnsembleError::InvalidYearRange { start, end });
        }
        Ok(YearRange { start, end })
    }

    /// A single year.
    pub const fn single(year: i32) -> YearRange {
        YearRange {
            start: year,
            end: year,
        }
    }

    pub const fn start(&self) -> i32 {
        self.start
    }

    pub const fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Title of the seasonal-cycle chart for this selection.
    pub fn seasonal_cycle_title(&self) -> String {
        format!("Seasonal Cycle for {self}")
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_single_year() {
        let range = YearRange::single(1999);
        assert!(range.contains(1999));
        assert_eq!((range.start(), range.end()), (1999, 1999));
        assert_eq!(range.seasonal_cycle_title(), "Seasonal Cycle for 1999");
    }

    #[test]
    fn test_year_range_title() {
        let range = YearRange::new(1990, 2000).unwrap();
        assert_eq!(range.seasonal_cycle_title(), "Seasonal Cycle for 1990-2000");
    }

    #[test]
    fn test_year_range_bounds_are_inclusive() {
        let range = YearRange::new(2000, 2020).unwrap();
        assert!(!range.contains(1999));
        assert!(range.contains(2000));
        assert!(range.contains(2020));
        assert!(!range.contains(2021));
    }

    #[test]
    fn test_year_range_rejects_reversed() {
        assert!(matches!(
            YearRange::new(2021, 2020),
            Err(EnsembleError::InvalidYearRange {
                start: 2021,
                end: 2020
            })
        ));
    }
}
