use super::Spreadsheet;
use crate::error::Result;
use sheetcalc_engine::engine::{CellContent, CellName, CellValue};

impl Spreadsheet {
    /// Value of a cell: numbers and text evaluate to themselves, formulas to
    /// a number or a [`FormulaError`](sheetcalc_engine::FormulaError).
    /// Unset cells have the value empty text.
    pub fn get_value(&self, name: &str) -> Result<CellValue> {
        let name = self.normalize_name(name)?;
        Ok(self
            .values
            .get(&name)
            .cloned()
            .unwrap_or_else(|| CellValue::Text(String::new())))
    }

    /// Same as [`Spreadsheet::get_value`].
    pub fn get_cell_value(&self, name: &str) -> Result<CellValue> {
        self.get_value(name)
    }

    /// Recompute cached values for `order`, which must list every cell after
    /// the cells it reads.
    pub(crate) fn recalculate(&mut self, order: &[String]) {
        for name in order {
            let Some(name) = CellName::parse(name) else {
                continue;
            };
            match self.compute_value(&name) {
                Some(value) => {
                    self.values.insert(name, value);
                }
                None => {
                    self.values.remove(&name);
                }
            }
        }
    }

    fn compute_value(&self, name: &CellName) -> Option<CellValue> {
        let value = match self.cells.get(name)? {
            CellContent::Number(n) => CellValue::Number(*n),
            CellContent::Text(s) => CellValue::Text(s.clone()),
            CellContent::Formula(formula) => formula
                .evaluate(|variable| self.values.get(variable).and_then(CellValue::as_number))
                .into(),
        };
        Some(value)
    }
}
