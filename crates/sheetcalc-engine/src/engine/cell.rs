//! Cell contents and values.
//!
//! - [`CellContent`] - What the user typed: a number, text, or a formula
//! - [`CellValue`] - What the cell evaluates to: a number, text, or an error

use serde::{Deserialize, Serialize};
use std::fmt;

use super::eval::FormulaError;
use super::format::{canonical_number, format_number};
use super::formula::{Formula, FormulaFormatError};

/// The raw contents of a cell. Empty text means the cell is empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    Number(f64),
    Text(String),
    Formula(Formula),
}

/// The computed value of a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    FormulaError(FormulaError),
}

impl CellContent {
    /// Empty contents, as reported for cells that were never set.
    pub fn empty() -> CellContent {
        CellContent::Text(String::new())
    }

    /// Parse user input.
    /// - Finite number (surrounding whitespace allowed) -> Number
    /// - Starts with '=' -> Formula (without the '=')
    /// - Otherwise -> Text, kept verbatim
    pub fn from_input(input: &str) -> Result<CellContent, FormulaFormatError> {
        if let Ok(n) = input.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(CellContent::Number(n));
            }
        }

        if let Some(formula) = input.strip_prefix('=') {
            return Ok(CellContent::Formula(Formula::new(formula)?));
        }

        Ok(CellContent::Text(input.to_string()))
    }

    /// The text that, passed back to [`CellContent::from_input`], reproduces
    /// these contents.
    pub fn to_input_string(&self) -> String {
        match self {
            CellContent::Number(n) => canonical_number(*n),
            CellContent::Text(s) => s.clone(),
            CellContent::Formula(f) => format!("={}", f),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Text(s) if s.is_empty())
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContent::Formula(f) => Some(f),
            _ => None,
        }
    }
}

impl CellValue {
    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::FormulaError(_))
    }
}

impl From<Result<f64, FormulaError>> for CellValue {
    fn from(result: Result<f64, FormulaError>) -> CellValue {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::FormulaError(e),
        }
    }
}

/// Display form for a grid front end.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::FormulaError(e) => write!(f, "#ERR: {}", e),
        }
    }
}
