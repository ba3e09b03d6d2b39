use crate::error::{EnsembleError, Result};
use crate::table::{Column, WideTable};
use std::fmt;
use std::str::FromStr;

/// Selector value meaning "all members of the variable".
pub const AVERAGE_SENTINEL: &str = "Average";

/// Members per variable in the large ensemble (ids 0 through 19).
pub const ENSEMBLE_MEMBER_COUNT: u32 = 20;

pub const DEFAULT_ENSEMBLE: EnsembleSelector = EnsembleSelector::Average;

/// Which member columns of a variable take part in an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnsembleSelector {
    /// Every column matching the variable: mean with min/max spread.
    #[default]
    Average,
    /// Exactly the column `{variable}_{id}`.
    Member(u32),
}

impl EnsembleSelector {
    /// Resolve the columns of `table` this selector picks for `variable`.
    ///
    /// Fails with `InvalidVariable` when no column contains `variable` and
    /// with `EmptySelection` when a member id has no column.
    pub fn select<'a>(&self, table: &'a WideTable, variable: &str) -> Result<Vec<&'a Column>> {
        let matching = table.matching_columns(variable);
        if matching.is_empty() {
            return Err(EnsembleError::InvalidVariable(variable.to_string()));
        }
        let selected = match self {
            EnsembleSelector::Average => matching,
            EnsembleSelector::Member(id) => {
                let name = format!("{variable}_{id}");
                matching.into_iter().filter(|c| c.name == name).collect()
            }
        };
        if selected.is_empty() {
            return Err(EnsembleError::EmptySelection {
                variable: variable.to_string(),
                selector: self.to_string(),
            });
        }
        Ok(selected)
    }
}

impl FromStr for EnsembleSelector {
    type Err = EnsembleError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(AVERAGE_SENTINEL) {
            return Ok(EnsembleSelector::Average);
        }
        trimmed
            .parse::<u32>()
            .map(EnsembleSelector::Member)
            .map_err(|_| EnsembleError::InvalidEnsemble(s.to_string()))
    }
}

impl fmt::Display for EnsembleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnsembleSelector::Average => write!(f, "{AVERAGE_SENTINEL}"),
            EnsembleSelector::Member(id) => write!(f, "{id}"),
        }
    }
}

/// Options of the "Ensemble #" menu: the average first, then each member.
pub fn ensemble_options() -> Vec<String> {
    std::iter::once(AVERAGE_SENTINEL.to_string())
        .chain((0..ENSEMBLE_MEMBER_COUNT).map(|id| id.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cev_utils::dates::parse_timestamp;

    fn table() -> WideTable {
        let times = vec![
            parse_timestamp("2000-01-15").unwrap(),
            parse_timestamp("2000-02-15").unwrap(),
        ];
        WideTable::new(
            times,
            vec![
                Column::new("PRECT_0", vec![1.0, 2.0]),
                Column::new("PRECT_1", vec![3.0, 4.0]),
                Column::new("PRECT_11", vec![5.0, 6.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn parse_selector() {
        assert_eq!("Average".parse::<EnsembleSelector>().unwrap(), EnsembleSelector::Average);
        assert_eq!("average".parse::<EnsembleSelector>().unwrap(), EnsembleSelector::Average);
        assert_eq!("7".parse::<EnsembleSelector>().unwrap(), EnsembleSelector::Member(7));
        assert!(matches!(
            "seven".parse::<EnsembleSelector>(),
            Err(EnsembleError::InvalidEnsemble(_))
        ));
    }

    #[test]
    fn average_selects_all_matching() {
        let table = table();
        let columns = EnsembleSelector::Average.select(&table, "PRECT").unwrap();
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn member_selects_exactly_one_column() {
        let table = table();
        let columns = EnsembleSelector::Member(1).select(&table, "PRECT").unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "PRECT_1");
    }

    #[test]
    fn missing_member_is_empty_selection() {
        let table = table();
        let result = EnsembleSelector::Member(4).select(&table, "PRECT");
        assert!(matches!(result, Err(EnsembleError::EmptySelection { .. })));
    }

    #[test]
    fn unknown_variable_is_invalid_variable() {
        let table = table();
        let result = EnsembleSelector::Average.select(&table, "TREFHT");
        assert!(matches!(result, Err(EnsembleError::InvalidVariable(v)) if v == "TREFHT"));
    }

    #[test]
    fn options_start_with_average() {
        let options = ensemble_options();
        assert_eq!(options.len(), 21);
        assert_eq!(options[0], "Average");
        assert_eq!(options[1], "0");
        assert_eq!(options[20], "19");
    }
}
