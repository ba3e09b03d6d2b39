use cev_utils::dates::decade_for_year;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Calendar fields of one row's timestamp, used as group-by keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl TimeFields {
    /// First year of the decade this row falls in.
    pub fn decade(&self) -> i32 {
        decade_for_year(self.year)
    }
}

impl From<&NaiveDateTime> for TimeFields {
    fn from(timestamp: &NaiveDateTime) -> Self {
        TimeFields {
            year: timestamp.year(),
            month: timestamp.month(),
            day: timestamp.day(),
            hour: timestamp.hour(),
        }
    }
}

/// Derive year/month/day/hour for every timestamp.
pub fn extract_time_fields(times: &[NaiveDateTime]) -> Vec<TimeFields> {
    times.iter().map(TimeFields::from).collect()
}
