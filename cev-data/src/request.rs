use crate::frequency::{Frequency, DEFAULT_FREQUENCY};
use cev_ensemble::ensemble::{EnsembleSelector, DEFAULT_ENSEMBLE};
use cev_ensemble::variable::DEFAULT_VARIABLE;
use cev_ensemble::year_range::{YearRange, REFERENCE_WINDOW};
use cev_ensemble::Result;

/// Everything one aggregation needs besides the table itself.
///
/// Each dashboard interaction (variable, ensemble or frequency changed, or
/// a time range selected on the chart) produces a new request; the engine
/// answers it from the unchanged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRequest {
    /// Substring matched against member column names.
    pub variable: String,
    pub ensemble: EnsembleSelector,
    pub frequency: Frequency,
    /// Years averaged into the reference climatology.
    pub reference_window: YearRange,
    /// Restrict the table to these years before aggregating.
    pub year_range: Option<YearRange>,
}

impl Default for AggregationRequest {
    fn default() -> Self {
        AggregationRequest {
            variable: DEFAULT_VARIABLE.to_string(),
            ensemble: DEFAULT_ENSEMBLE,
            frequency: DEFAULT_FREQUENCY,
            reference_window: REFERENCE_WINDOW,
            year_range: None,
        }
    }
}

impl AggregationRequest {
    pub fn new(variable: &str, ensemble: EnsembleSelector, frequency: Frequency) -> Self {
        AggregationRequest {
            variable: variable.to_string(),
            ensemble,
            frequency,
            ..Default::default()
        }
    }

    /// Build a request from the string values of the dashboard menus.
    pub fn parse(variable: &str, ensemble: &str, frequency: &str) -> Result<Self> {
        Ok(AggregationRequest::new(
            variable,
            ensemble.parse()?,
            frequency.parse()?,
        ))
    }

    pub fn with_variable(mut self, variable: &str) -> Self {
        self.variable = variable.to_string();
        self
    }

    pub fn with_ensemble(mut self, ensemble: EnsembleSelector) -> Self {
        self.ensemble = ensemble;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_reference_window(mut self, window: YearRange) -> Self {
        self.reference_window = window;
        self
    }

    pub fn with_year_range(mut self, range: Option<YearRange>) -> Self {
        self.year_range = range;
        self
    }
}
