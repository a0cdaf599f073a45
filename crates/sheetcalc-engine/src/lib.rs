//! sheetcalc_engine - Dependency graph, formulas and recalculation order.

pub mod engine;

pub use engine::{
    CellContent, CellName, CellValue, CircularDependency, DependencyGraph, Formula, FormulaError,
    FormulaFormatError,
};
