//! sheetcalc-core - UI-agnostic spreadsheet model.

pub mod config;
pub mod error;
pub mod sheet;

pub use config::SheetConfig;
pub use error::{Result, SheetError};
pub use sheet::Spreadsheet;

pub use sheetcalc_engine::engine::{CellContent, CellName, CellValue, Formula, FormulaError};
