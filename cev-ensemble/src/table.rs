use crate::error::{EnsembleError, Result};
use crate::time_fields::{extract_time_fields, TimeFields};
use crate::year_range::YearRange;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Name of the timestamp column in the source CSV.
pub const TIME_COLUMN: &str = "time";

/// One named series of values, one entry per table row.
///
/// Missing readings are stored as `f64::NAN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: &str, values: Vec<f64>) -> Column {
        Column {
            name: name.to_string(),
            values,
        }
    }

    /// Split `{VARIABLE}_{member}` into its parts, if the suffix is a member id.
    pub fn variable_and_member(&self) -> Option<(&str, u32)> {
        let (variable, member) = self.name.rsplit_once('_')?;
        if variable.is_empty() {
            return None;
        }
        member.parse::<u32>().ok().map(|id| (variable, id))
    }
}

/// A parsed table still in raw model units.
///
/// The only way to turn it into a [`WideTable`] is
/// [`crate::units::normalize_units`], which consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub times: Vec<NaiveDateTime>,
    pub columns: Vec<Column>,
}

/// The immutable input of the aggregation engine: one row per time step,
/// one column per ensemble member and variable, values in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    times: Vec<NaiveDateTime>,
    fields: Vec<TimeFields>,
    columns: Vec<Column>,
}

impl WideTable {
    /// Build a table from timestamps and already-converted columns.
    ///
    /// Every column must have one value per timestamp and timestamps must be
    /// strictly increasing.
    pub fn new(times: Vec<NaiveDateTime>, columns: Vec<Column>) -> Result<WideTable> {
        for column in &columns {
            if column.values.len() != times.len() {
                return Err(EnsembleError::ColumnLength {
                    column: column.name.clone(),
                    expected: times.len(),
                    found: column.values.len(),
                });
            }
        }
        if let Some(row) = times.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(EnsembleError::NonMonotonicTime { row: row + 1 });
        }
        let fields = extract_time_fields(&times);
        Ok(WideTable {
            times,
            fields,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    pub fn fields(&self) -> &[TimeFields] {
        &self.fields
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose name contains `variable` (case-sensitive substring match).
    pub fn matching_columns(&self, variable: &str) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.name.contains(variable))
            .collect()
    }

    /// Variable names present in the table, sorted.
    pub fn variables(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|c| c.variable_and_member())
            .map(|(variable, _)| variable.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Member ids present for exactly `variable`, sorted.
    pub fn members(&self, variable: &str) -> Vec<u32> {
        self.columns
            .iter()
            .filter_map(|c| c.variable_and_member())
            .filter(|(v, _)| *v == variable)
            .map(|(_, id)| id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First and last year covered by the table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        match (self.fields.first(), self.fields.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }

    /// A new table holding only the rows whose year lies in `range`.
    pub fn restrict_years(&self, range: YearRange) -> Result<WideTable> {
        let rows = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| range.contains(f.year))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return Err(EnsembleError::EmptyRange {
                start: range.start(),
                end: range.end(),
            });
        }
        let times = rows.iter().map(|&i| self.times[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: rows.iter().map(|&i| c.values[i]).collect(),
            })
            .collect();
        WideTable::new(times, columns)
    }
}
