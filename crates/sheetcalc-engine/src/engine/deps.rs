//! Dependency graph between cells.
//!
//! Stores ordered pairs `(dependee, dependent)` with set semantics:
//!
//! ```text
//! (A, B)  means  "B depends on A"  (A must be evaluated before B)
//! ```
//!
//! Both directions are indexed so that "who depends on X?" and "what does X
//! depend on?" are single map lookups. The graph knows nothing about cells or
//! formulas; self edges and cycles are allowed here and policed by the
//! spreadsheet.

use std::collections::{HashMap, HashSet};

/// A set of `(dependee, dependent)` pairs over arbitrary string names.
///
/// Invariants:
/// - `t ∈ dependents[s]` iff `s ∈ dependees[t]`.
/// - No empty sets are stored; a name with no edges has no entry.
/// - `size` is the number of distinct pairs.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    /// dependee -> names that depend on it
    dependents: HashMap<String, HashSet<String>>,
    /// dependent -> names it depends on
    dependees: HashMap<String, HashSet<String>>,
    size: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs in the graph.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn has_dependents(&self, name: &str) -> bool {
        self.dependents.contains_key(name)
    }

    pub fn has_dependees(&self, name: &str) -> bool {
        self.dependees.contains_key(name)
    }

    /// Names that depend on `name`.
    pub fn get_dependents<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependents
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Names that `name` depends on.
    pub fn get_dependees<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependees
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Add the pair `(dependee, dependent)`. Adding an existing pair is a no-op.
    pub fn add(&mut self, dependee: &str, dependent: &str) {
        let inserted = self
            .dependents
            .entry(dependee.to_string())
            .or_default()
            .insert(dependent.to_string());
        if !inserted {
            return;
        }
        self.dependees
            .entry(dependent.to_string())
            .or_default()
            .insert(dependee.to_string());
        self.size += 1;
        log::trace!("dependency added: {dependee} -> {dependent}");
    }

    /// Remove the pair `(dependee, dependent)` if present.
    pub fn remove(&mut self, dependee: &str, dependent: &str) {
        let removed = match self.dependents.get_mut(dependee) {
            Some(set) => {
                let removed = set.remove(dependent);
                if set.is_empty() {
                    self.dependents.remove(dependee);
                }
                removed
            }
            None => false,
        };
        if !removed {
            return;
        }
        if let Some(set) = self.dependees.get_mut(dependent) {
            set.remove(dependee);
            if set.is_empty() {
                self.dependees.remove(dependent);
            }
        }
        self.size -= 1;
        log::trace!("dependency removed: {dependee} -> {dependent}");
    }

    /// Replace every pair `(name, *)` with `(name, t)` for each `t` in `new_dependents`.
    pub fn replace_dependents<I, S>(&mut self, name: &str, new_dependents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependents.get(name).cloned() {
            for dependent in &old {
                self.remove(name, dependent);
            }
        }
        for dependent in new_dependents {
            self.add(name, dependent.as_ref());
        }
    }

    /// Replace every pair `(*, name)` with `(s, name)` for each `s` in `new_dependees`.
    pub fn replace_dependees<I, S>(&mut self, name: &str, new_dependees: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependees.get(name).cloned() {
            for dependee in &old {
                self.remove(dependee, name);
            }
        }
        for dependee in new_dependees {
            self.add(dependee.as_ref(), name);
        }
    }
}
