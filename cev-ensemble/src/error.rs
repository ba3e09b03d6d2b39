/// Error types for ensemble tables and the aggregation engine
use cev_utils::error::DateError;
use thiserror::Error;

/// Main error type for loading and aggregating ensemble tables
#[derive(Error, Debug)]
pub enum EnsembleError {
    /// No column name contains the requested variable
    #[error("No column matches variable '{0}'")]
    InvalidVariable(String),

    /// Frequency is not Monthly, Annual or Decadal
    #[error("Invalid frequency '{0}' (expected Monthly, Annual or Decadal)")]
    InvalidFrequency(String),

    /// The ensemble selector matched zero columns
    #[error("Ensemble selector '{selector}' matches no column for variable '{variable}'")]
    EmptySelection { variable: String, selector: String },

    /// Selector is neither "Average" nor a member id
    #[error("Invalid ensemble selector '{0}' (expected \"Average\" or a member id)")]
    InvalidEnsemble(String),

    /// A `time` cell could not be parsed. `row` is the 0-based data row,
    /// not counting the header line.
    #[error("Unparseable timestamp '{value}' at row {row}")]
    UnparseableTimestamp { row: usize, value: String },

    /// Rows are not in strictly increasing time order. `row` is the 0-based
    /// index of the first out-of-order row.
    #[error("Timestamps are not strictly increasing at row {row}")]
    NonMonotonicTime { row: usize },

    /// The CSV header has no `time` column
    #[error("Missing 'time' column")]
    MissingTimeColumn,

    /// A data cell is not a number. `row` is the 0-based data row, not
    /// counting the header line.
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// A column does not have one value per timestamp
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Year range with start after end
    #[error("Invalid year range {start}-{end}")]
    InvalidYearRange { start: i32, end: i32 },

    /// Year range selects no rows
    #[error("No rows between {start} and {end}")]
    EmptyRange { start: i32, end: i32 },

    /// Date arithmetic failed
    #[error(transparent)]
    Date(#[from] DateError),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to read input
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using EnsembleError
pub type Result<T> = std::result::Result<T, EnsembleError>;
