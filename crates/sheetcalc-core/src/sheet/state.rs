use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use regex::Regex;
use sheetcalc_engine::engine::{CellContent, CellName, CellValue, DependencyGraph};
use std::collections::{BTreeSet, HashMap};

/// In-memory spreadsheet: cell contents, the dependencies their formulas
/// induce, and the computed value of every non-empty cell.
#[derive(Clone, Debug)]
pub struct Spreadsheet {
    /// Non-empty cells keyed by normalized name
    pub(crate) cells: HashMap<CellName, CellContent>,
    /// Edge (A, B) means B's formula references A
    pub(crate) dependencies: DependencyGraph,
    /// Computed value of every non-empty cell, kept current by `set`
    pub(crate) values: HashMap<CellName, CellValue>,
    /// Whether the sheet changed since it was last saved
    pub(crate) changed: bool,
    pub(crate) version: String,
    pub(crate) name_pattern: Option<Regex>,
}

impl Spreadsheet {
    /// Create an empty spreadsheet with the default configuration.
    pub fn new() -> Self {
        Spreadsheet {
            cells: HashMap::new(),
            dependencies: DependencyGraph::new(),
            values: HashMap::new(),
            changed: false,
            version: SheetConfig::default().version,
            name_pattern: None,
        }
    }

    /// Create an empty spreadsheet from configuration.
    pub fn with_config(config: &SheetConfig) -> Result<Self> {
        let name_pattern = config.compile_name_pattern()?;
        Ok(Spreadsheet {
            version: config.version.clone(),
            name_pattern,
            ..Self::new()
        })
    }

    /// Validate and normalize a cell name against the sheet's naming rules.
    pub(crate) fn normalize_name(&self, name: &str) -> Result<CellName> {
        let normalized = CellName::parse(name)
            .filter(|n| self.name_pattern.as_ref().is_none_or(|re| re.is_match(n.as_str())))
            .ok_or_else(|| SheetError::InvalidName(name.to_string()))?;
        Ok(normalized)
    }

    /// Names of every cell whose contents are not empty.
    pub fn get_names_of_all_nonempty_cells(&self) -> BTreeSet<String> {
        self.cells.keys().map(|name| name.to_string()).collect()
    }

    /// Contents of every non-empty cell, in no particular order.
    pub fn iter_contents(&self) -> impl Iterator<Item = (&str, &CellContent)> {
        self.cells
            .iter()
            .map(|(name, contents)| (name.as_str(), contents))
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if a successful `set` happened since creation or the last
    /// [`Spreadsheet::mark_saved`].
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Called by a persistence layer once the contents are written out.
    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The dependency graph between cells (read-only).
    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}
