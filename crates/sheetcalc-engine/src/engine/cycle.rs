//! Recalculation order and circular dependency detection.
//!
//! When a cell changes, it and everything that (transitively) depends on it
//! must be recomputed, each after the cells it reads. A depth-first search
//! over the "depends on me" edges, emitting each cell only after all of its
//! dependents and prepending it to the result, yields exactly that order.
//! Reaching the starting cell again means the change closed a loop.
//!
//! The search keeps its own stack so chains of thousands of cells cannot
//! exhaust the thread stack.

use std::collections::{HashSet, VecDeque};
use thiserror::Error;

use super::deps::DependencyGraph;

/// A cell (transitively) depends on itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular dependency involving {cell}")]
pub struct CircularDependency {
    pub cell: String,
}

/// Cells to recompute after `start` changes, in a safe evaluation order.
///
/// `start` comes first; every other cell appears after all listed cells it
/// depends on.
pub fn cells_to_recalculate(
    start: &str,
    graph: &DependencyGraph,
) -> Result<Vec<String>, CircularDependency> {
    let mut order: VecDeque<String> = VecDeque::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&str, std::vec::IntoIter<&str>)> = Vec::new();

    visited.insert(start);
    stack.push((start, direct_dependents(start, graph)));

    loop {
        let next = match stack.last_mut() {
            Some((_, dependents)) => dependents.next(),
            None => break,
        };
        match next {
            Some(dependent) if dependent == start => {
                return Err(CircularDependency {
                    cell: start.to_string(),
                });
            }
            Some(dependent) => {
                if visited.insert(dependent) {
                    stack.push((dependent, direct_dependents(dependent, graph)));
                }
            }
            None => {
                if let Some((finished, _)) = stack.pop() {
                    order.push_front(finished.to_string());
                }
            }
        }
    }

    Ok(order.into())
}

fn direct_dependents<'a>(name: &str, graph: &'a DependencyGraph) -> std::vec::IntoIter<&'a str> {
    let mut dependents: Vec<&'a str> = graph.get_dependents(name).collect();
    // Deterministic order between runs.
    dependents.sort_unstable();
    dependents.into_iter()
}
