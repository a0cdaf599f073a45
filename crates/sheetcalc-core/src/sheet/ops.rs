use super::Spreadsheet;
use crate::error::{Result, SheetError};
use sheetcalc_engine::engine::{CellContent, CellName, cells_to_recalculate};

impl Spreadsheet {
    /// Contents of a cell; empty text if the cell was never set.
    pub fn get_contents(&self, name: &str) -> Result<CellContent> {
        let name = self.normalize_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .cloned()
            .unwrap_or_else(CellContent::empty))
    }

    /// Set cell contents from input text and return the cells whose values
    /// must be recomputed, in a safe order (the cell itself first).
    ///
    /// Numbers become numbers, `=...` becomes a formula, anything else is
    /// text; empty text clears the cell. On any error the spreadsheet is left
    /// exactly as it was.
    pub fn set(&mut self, name: &str, content: &str) -> Result<Vec<String>> {
        let name = self.normalize_name(name)?;
        let contents = CellContent::from_input(content)?;

        let references: Vec<String> = match &contents {
            CellContent::Formula(formula) => {
                let mut references: Vec<String> = formula.get_variables().into_iter().collect();
                references.sort();
                for reference in &references {
                    self.normalize_name(reference)?;
                }
                references
            }
            _ => Vec::new(),
        };

        let previous: Vec<String> = self
            .dependencies
            .get_dependees(name.as_str())
            .map(str::to_string)
            .collect();
        self.dependencies
            .replace_dependees(name.as_str(), &references);

        let order = match cells_to_recalculate(name.as_str(), &self.dependencies) {
            Ok(order) => order,
            Err(err) => {
                self.dependencies.replace_dependees(name.as_str(), &previous);
                log::debug!("rejected {name}: {err}");
                return Err(SheetError::from(err));
            }
        };

        self.store(name.clone(), contents);
        self.recalculate(&order);
        self.changed = true;

        log::debug!("set {name}; recalculated {} cell(s)", order.len());
        Ok(order)
    }

    fn store(&mut self, name: CellName, contents: CellContent) {
        if contents.is_empty() {
            self.cells.remove(&name);
        } else {
            self.cells.insert(name, contents);
        }
    }

    /// Same as [`Spreadsheet::set`].
    pub fn set_contents_of_cell(&mut self, name: &str, content: &str) -> Result<Vec<String>> {
        self.set(name, content)
    }

    /// Same as [`Spreadsheet::get_contents`].
    pub fn get_cell_contents(&self, name: &str) -> Result<CellContent> {
        self.get_contents(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use pretty_assertions::assert_eq;
    use sheetcalc_engine::engine::Formula;
    use std::collections::BTreeSet;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_contents_of_unset_cell_is_empty_text() {
        let sheet = Spreadsheet::new();
        assert_eq!(sheet.get_contents("A2").unwrap(), CellContent::empty());
    }

    #[test]
    fn test_invalid_names_rejected_everywhere() {
        let mut sheet = Spreadsheet::new();
        for bad in ["17A", "", "A", "1", "A1A", "A 1"] {
            assert_eq!(
                sheet.set(bad, "5"),
                Err(SheetError::InvalidName(bad.to_string()))
            );
            assert!(matches!(
                sheet.get_contents(bad),
                Err(SheetError::InvalidName(_))
            ));
        }
        assert!(sheet.is_empty());
        assert!(!sheet.changed());
    }

    #[test]
    fn test_set_number_text_formula() {
        let mut sheet = Spreadsheet::new();
        assert_eq!(sheet.set("z7", "1.5").unwrap(), vec!["Z7"]);
        assert_eq!(sheet.get_contents("Z7").unwrap(), CellContent::Number(1.5));

        sheet.set("B1", "hello").unwrap();
        assert_eq!(
            sheet.get_contents("b1").unwrap(),
            CellContent::Text("hello".to_string())
        );

        sheet.set("C1", "=3").unwrap();
        let contents = sheet.get_contents("C1").unwrap();
        assert_eq!(contents, CellContent::Formula(Formula::new("3").unwrap()));
        assert_ne!(contents, CellContent::Formula(Formula::new("2").unwrap()));

        assert_eq!(sheet.get_names_of_all_nonempty_cells(), names(&["B1", "C1", "Z7"]));
    }

    #[test]
    fn test_set_empty_removes_cell() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "5").unwrap();
        sheet.set("A1", "").unwrap();
        assert!(sheet.get_names_of_all_nonempty_cells().is_empty());
        assert_eq!(sheet.get_contents("A1").unwrap(), CellContent::empty());

        // Clearing a cell that was never set is fine too.
        assert_eq!(sheet.set("B1", "").unwrap(), vec!["B1"]);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_set_returns_dependents_in_order() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "=B1+4").unwrap();
        sheet.set("B1", "=C1*2").unwrap();
        assert_eq!(sheet.set("C1", "15").unwrap(), vec!["C1", "B1", "A1"]);
    }

    #[test]
    fn test_replacing_formula_drops_old_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "=B1+C1").unwrap();
        assert_eq!(sheet.dependencies().size(), 2);
        sheet.set("A1", "=D1").unwrap();
        assert_eq!(sheet.dependencies().size(), 1);
        assert_eq!(sheet.set("B1", "1").unwrap(), vec!["B1"]);
        assert_eq!(sheet.set("D1", "1").unwrap(), vec!["D1", "A1"]);

        sheet.set("A1", "2.5").unwrap();
        assert!(sheet.dependencies().is_empty());
        assert_eq!(sheet.get_contents("A1").unwrap(), CellContent::Number(2.5));
    }

    #[test]
    fn test_bad_formula_leaves_sheet_unchanged() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "=B1").unwrap();
        sheet.mark_saved();

        let err = sheet.set("A1", "=C1 +").unwrap_err();
        assert!(matches!(err, SheetError::Formula(_)));
        assert_eq!(
            sheet.get_contents("A1").unwrap(),
            CellContent::Formula(Formula::new("B1").unwrap())
        );
        assert_eq!(sheet.set("B1", "2").unwrap(), vec!["B1", "A1"]);
    }

    #[test]
    fn test_self_reference_is_circular() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "7").unwrap();
        assert_eq!(
            sheet.set("A1", "=A1+1"),
            Err(SheetError::CircularDependency("A1".to_string()))
        );
        assert_eq!(sheet.get_contents("A1").unwrap(), CellContent::Number(7.0));
        assert!(sheet.dependencies().is_empty());
    }

    #[test]
    fn test_circular_rollback_restores_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "=A2+A3").unwrap();
        sheet.set("A3", "=A4").unwrap();
        sheet.set("A2", "15").unwrap();
        sheet.mark_saved();

        let err = sheet.set("A3", "=A1").unwrap_err();
        assert_eq!(err, SheetError::CircularDependency("A3".to_string()));
        assert!(!sheet.changed());
        assert_eq!(sheet.get_contents("A2").unwrap(), CellContent::Number(15.0));
        assert_eq!(
            sheet.get_contents("A3").unwrap(),
            CellContent::Formula(Formula::new("A4").unwrap())
        );
        assert_eq!(sheet.dependencies().size(), 3);
        assert_eq!(sheet.set("A4", "1").unwrap(), vec!["A4", "A3", "A1"]);
    }

    #[test]
    fn test_simple_circular_leaves_new_cell_empty() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "=A2").unwrap();
        assert!(sheet.set("A2", "=A1").is_err());
        assert_eq!(sheet.get_contents("A2").unwrap(), CellContent::empty());
        assert_eq!(sheet.get_names_of_all_nonempty_cells(), names(&["A1"]));
    }

    #[test]
    fn test_changed_flag() {
        let mut sheet = Spreadsheet::new();
        assert!(!sheet.changed());
        sheet.set("A1", "1").unwrap();
        assert!(sheet.changed());
        sheet.mark_saved();
        assert!(!sheet.changed());
        let _ = sheet.set("1A", "1");
        assert!(!sheet.changed());
    }

    #[test]
    fn test_name_pattern_restricts_cells_and_references() {
        let config = SheetConfig {
            version: "v1".to_string(),
            name_pattern: Some("^[A-Z][0-9]$".to_string()),
        };
        let mut sheet = Spreadsheet::with_config(&config).unwrap();
        assert_eq!(sheet.version(), "v1");

        sheet.set("b2", "1").unwrap();
        assert_eq!(
            sheet.set("AA1", "1"),
            Err(SheetError::InvalidName("AA1".to_string()))
        );
        assert_eq!(
            sheet.set("C3", "=B2 + B22"),
            Err(SheetError::InvalidName("B22".to_string()))
        );
        assert_eq!(sheet.get_contents("C3").unwrap(), CellContent::empty());
        assert!(sheet.dependencies().is_empty());
    }

    #[test]
    fn test_iter_contents_round_trips_through_input_strings() {
        let mut sheet = Spreadsheet::new();
        sheet.set("A1", "3").unwrap();
        sheet.set("A2", "note").unwrap();
        sheet.set("A3", "= a1 * 2").unwrap();

        let mut copy = Spreadsheet::new();
        for (name, contents) in sheet.iter_contents() {
            copy.set(name, &contents.to_input_string()).unwrap();
        }
        for name in sheet.get_names_of_all_nonempty_cells() {
            assert_eq!(copy.get_contents(&name).unwrap(), sheet.get_contents(&name).unwrap());
        }
        assert_eq!(sheet.get_contents("A3").unwrap().to_input_string(), "=A1*2");
    }
}
