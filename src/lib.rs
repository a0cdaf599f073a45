//! sheetcalc - In-memory spreadsheet evaluation.
//!
//! Cells hold numbers, text or formulas (`=A1 * (B2 + 3)`). Setting a cell
//! updates the dependency graph, rejects assignments that would create a
//! circular reference, recomputes affected values and returns the cells a
//! front end must refresh, in a safe order.
//!
//! ```
//! use sheetcalc::{CellValue, Spreadsheet};
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set("A1", "=B1 + 4").unwrap();
//! sheet.set("B1", "=C1 * 2").unwrap();
//! let order = sheet.set("C1", "15").unwrap();
//! assert_eq!(order, vec!["C1", "B1", "A1"]);
//! assert_eq!(sheet.get_value("A1").unwrap(), CellValue::Number(34.0));
//! ```

pub use sheetcalc_core::{Result, SheetConfig, SheetError, Spreadsheet};
pub use sheetcalc_engine::engine::{
    CellContent, CellName, CellValue, CircularDependency, DependencyGraph, Formula, FormulaError,
    FormulaFormatError,
};
