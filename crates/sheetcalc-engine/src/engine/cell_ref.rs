//! Cell name parsing and normalization.
//!
//! A cell name is one or more ASCII letters followed by one or more digits
//! (e.g. "A1", "b12", "AA100"). Names are case-insensitive; the normalized
//! form is uppercase and is what every map in the engine is keyed by.
//!
//! # Examples
//!
//! ```ignore
//! let name = CellName::parse("b3").unwrap();
//! assert_eq!(name.as_str(), "B3");
//! assert!(CellName::parse("3B").is_none());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

/// A validated, uppercase-normalized cell name.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellName(String);

impl CellName {
    /// Parse a cell name, returning None if it is not letters followed by digits.
    pub fn parse(name: &str) -> Option<CellName> {
        if is_valid_name(name) {
            Some(CellName(name.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Returns true if `name` is letters followed by digits (case-insensitive).
pub fn is_valid_name(name: &str) -> bool {
    name_re().is_match(name)
}

fn name_re() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]+[0-9]+$").expect("cell name regex must compile")
    })
}

impl std::str::FromStr for CellName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell name: {}", s))
    }
}

impl TryFrom<String> for CellName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellName> for String {
    fn from(name: CellName) -> String {
        name.0
    }
}

impl Borrow<str> for CellName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CellName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
