//! Recalculation scheduling over the dependency graph.
//!
//! After a cell changes, every cell that transitively reads it must be
//! re-evaluated, and in an order where each formula sees already-updated
//! inputs. [`all_dependents`] collects the affected set and
//! [`recalculation_order`] linearizes it: Kahn's algorithm over in-degrees
//! counted within the affected subgraph only.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use super::graph::DependencyGraph;

/// Affected cells that could not be scheduled because they never reached
/// zero remaining in-degree.
///
/// This can only happen when a reference cycle was committed past the
/// cycle gate - a broken invariant, not a normal runtime condition. The
/// scheduler surfaces it instead of guessing an order, dropping cells, or
/// looping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedCells<K> {
    /// The affected cells left without a valid position in the order.
    pub unresolved: Vec<K>,
}

impl<K> fmt::Display for UnresolvedCells<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "recalculation order incomplete: {} cell(s) remain in a reference cycle",
            self.unresolved.len()
        )
    }
}

impl<K: fmt::Debug> std::error::Error for UnresolvedCells<K> {}

/// Every cell that directly or transitively reads `cell`, excluding
/// `cell` itself. Empty when nothing depends on it.
pub fn all_dependents<K>(graph: &DependencyGraph<K>, cell: &K) -> HashSet<K>
where
    K: Clone + Eq + Hash,
{
    let mut affected = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(cell.clone());

    while let Some(current) = queue.pop_front() {
        for dependent in graph.direct_dependents_of(&current) {
            if dependent != cell && affected.insert(dependent.clone()) {
                queue.push_back(dependent.clone());
            }
        }
    }
    affected
}

/// Compute the order in which the cells affected by a change to `cell`
/// must be re-evaluated.
///
/// The result contains exactly [`all_dependents`]`(graph, cell)`, arranged
/// so that wherever one affected cell reads another, the dependency comes
/// first. Cells with no constraint between them appear in no particular
/// order. A cell nothing reads yields an empty order - the caller
/// re-evaluates the edited cell itself either way.
pub fn recalculation_order<K>(
    graph: &DependencyGraph<K>,
    cell: &K,
) -> Result<Vec<K>, UnresolvedCells<K>>
where
    K: Clone + Eq + Hash,
{
    let affected = all_dependents(graph, cell);
    if affected.is_empty() {
        return Ok(Vec::new());
    }

    // In-degree restricted to edges with both endpoints affected. Edges to
    // the edited cell or to cells outside the closure constrain nothing in
    // this pass: those inputs are already up to date.
    let mut in_degree: HashMap<&K, usize> = HashMap::with_capacity(affected.len());
    for node in &affected {
        let degree = graph
            .dependencies_of(node)
            .filter(|dependency| affected.contains(*dependency))
            .count();
        in_degree.insert(node, degree);
    }

    let mut ready: VecDeque<&K> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(node, _)| *node)
        .collect();

    let mut order: Vec<K> = Vec::with_capacity(affected.len());
    while let Some(node) = ready.pop_front() {
        order.push(node.clone());
        for dependent in graph.direct_dependents_of(node) {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(dependent);
                }
            }
        }
    }

    if order.len() != affected.len() {
        let ordered: HashSet<&K> = order.iter().collect();
        let unresolved: Vec<K> = affected
            .iter()
            .filter(|node| !ordered.contains(*node))
            .cloned()
            .collect();
        return Err(UnresolvedCells { unresolved });
    }
    Ok(order)
}
