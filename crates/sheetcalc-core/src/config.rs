//! Spreadsheet configuration.
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! version = "ps6"
//! name_pattern = "^[A-Z][0-9]{1,2}$"
//! ```

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, SheetError};

/// Settings applied when a [`Spreadsheet`](crate::Spreadsheet) is created.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Version tag recorded by persistence layers next to the cell contents.
    pub version: String,
    /// Extra rule a (normalized, uppercase) cell name must match, on top of
    /// letters-followed-by-digits.
    pub name_pattern: Option<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            version: "default".to_string(),
            name_pattern: None,
        }
    }
}

impl SheetConfig {
    pub fn from_toml_str(text: &str) -> Result<SheetConfig> {
        toml::from_str(text).map_err(|e| SheetError::Config(e.to_string()))
    }

    /// Compile `name_pattern`, if any.
    pub(crate) fn compile_name_pattern(&self) -> Result<Option<Regex>> {
        self.name_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| SheetError::Config(format!("name_pattern: {}", e)))
            })
            .transpose()
    }
}
