//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`CellName`] - Cell name validation and normalization
//! - [`DependencyGraph`] - Dependee/dependent pairs between cells
//! - [`Formula`] - Tokenizing, validating and evaluating infix formulas
//! - [`CellContent`], [`CellValue`] - What a cell holds and what it evaluates to
//! - [`cells_to_recalculate`] - Recalculation order with cycle detection
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod formula;
mod token;

pub use cell::{CellContent, CellValue};
pub use cell_ref::{CellName, is_valid_name};
pub use cycle::{CircularDependency, cells_to_recalculate};
pub use deps::DependencyGraph;
pub use eval::FormulaError;
pub use format::{canonical_number, format_number};
pub use formula::{Formula, FormulaFormatError};
pub use token::{Operator, Token, tokenize};
