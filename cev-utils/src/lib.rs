//! Shared utility functions for CEV crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Timestamp layouts accepted for the `time` column, tried in order.
    pub const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y%m%d %H%M",
    ];

    /// Date-only layouts, interpreted as midnight.
    pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

    /// Month abbreviations, index 0 = January.
    pub const MONTH_ABBREVIATIONS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Format a NaiveDateTime as "YYYY-MM-DD HH:MM:SS"
    pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
        timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Parse a timestamp from a model output file.
    ///
    /// Accepts every layout in [`DATETIME_FORMATS`] and [`DATE_FORMATS`];
    /// surrounding whitespace is ignored.
    pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, DateError> {
        let trimmed = s.trim();
        for format in DATETIME_FORMATS {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(timestamp);
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                if let Some(timestamp) = date.and_hms_opt(0, 0, 0) {
                    return Ok(timestamp);
                }
            }
        }
        Err(DateError(format!("unrecognized timestamp '{trimmed}'")))
    }

    /// Three-letter abbreviation for a calendar month (1 = "Jan").
    pub fn month_abbr(month: u32) -> Option<&'static str> {
        match month {
            1..=12 => Some(MONTH_ABBREVIATIONS[(month - 1) as usize]),
            _ => None,
        }
    }

    /// First year of the decade containing `year`, e.g. 1987 -> 1980.
    pub fn decade_for_year(year: i32) -> i32 {
        year.div_euclid(10) * 10
    }

    /// Representative timestamp of a yearly bucket: June 30th at midnight.
    pub fn mid_year_timestamp(year: i32) -> Result<NaiveDateTime, DateError> {
        NaiveDate::from_ymd_opt(year, 6, 30)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| DateError(format!("year {year} out of range")))
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
