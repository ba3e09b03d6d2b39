//! Summaries of what an ensemble CSV contains.

use anyhow::Context;
use cev_ensemble::loader::load_path;
use cev_ensemble::variable::Variable;
use cev_ensemble::WideTable;
use serde::Serialize;
use std::path::Path;

/// One variable found in the table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VariableSummary {
    pub code: String,
    /// Axis label, for variables the viewer knows
    pub axis_label: Option<String>,
    pub members: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub variables: Vec<VariableSummary>,
}

pub fn summarize(table: &WideTable) -> TableSummary {
    let bounds = table.year_bounds();
    let variables = table
        .variables()
        .into_iter()
        .map(|code| VariableSummary {
            axis_label: Variable::from_code(&code).map(Variable::axis_label),
            members: table.members(&code),
            code,
        })
        .collect();
    TableSummary {
        rows: table.len(),
        first_year: bounds.map(|(first, _)| first),
        last_year: bounds.map(|(_, last)| last),
        variables,
    }
}

pub fn run_inspect(input: &Path) -> anyhow::Result<()> {
    let table = load_path(input).with_context(|| format!("Failed to load {}", input.display()))?;
    let summary = summarize(&table);

    match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => println!("{} rows, {} to {}", summary.rows, first, last),
        _ => println!("{} rows", summary.rows),
    }
    for variable in &summary.variables {
        let members = variable
            .members
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{:<16} {:<36} members {}",
            variable.code,
            variable.axis_label.as_deref().unwrap_or("-"),
            members
        );
    }
    Ok(())
}
