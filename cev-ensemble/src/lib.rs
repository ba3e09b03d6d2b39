//! Core types for climate model ensemble output.
//!
//! A model run is delivered as one wide CSV: a `time` column plus one column
//! per ensemble member and variable, named `{VARIABLE}_{member}`. This crate
//! parses that file, converts raw model units to display units and exposes
//! the result as an immutable [`table::WideTable`].

pub mod ensemble;
pub mod error;
pub mod loader;
pub mod table;
pub mod time_fields;
pub mod units;
pub mod variable;
pub mod year_range;

pub use error::{EnsembleError, Result};
pub use table::{Column, RawTable, WideTable};
