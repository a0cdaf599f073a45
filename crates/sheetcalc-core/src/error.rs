//! Error types for Sheetcalc core.

use thiserror::Error;

use sheetcalc_engine::{CircularDependency, FormulaFormatError};

/// Errors that abort a spreadsheet operation without changing any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("Invalid cell name: {0}")]
    InvalidName(String),

    #[error("Formula format error: {0}")]
    Formula(#[from] FormulaFormatError),

    #[error("Circular dependency detected at {0}")]
    CircularDependency(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<CircularDependency> for SheetError {
    fn from(err: CircularDependency) -> Self {
        SheetError::CircularDependency(err.cell)
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
