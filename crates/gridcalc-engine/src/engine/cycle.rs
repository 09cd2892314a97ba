//! Circular reference detection for formula cells.
//!
//! A formula that (transitively) reads its own cell would recalculate
//! forever. [`would_create_cycle`] answers the question against a proposed
//! reference list before any edge is committed, so the edit pipeline never
//! needs a rollback path; [`detect_cycle`] inspects the graph as it stands
//! and produces the witness path for error display.
//!
//! Both traversals are iterative with explicit stacks: a pathologically
//! long dependency chain must not overflow the call stack.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::graph::DependencyGraph;

/// Detect whether following depends-on edges from `start` leads back to
/// `start` itself. Returns the witness path `[start, ..., start]` if so,
/// None otherwise.
///
/// Only paths returning to the origin count: reaching some *other* cell by
/// two routes (a diamond) is not a cycle.
pub fn detect_cycle<K>(graph: &DependencyGraph<K>, start: &K) -> Option<Vec<K>>
where
    K: Clone + Eq + Hash,
{
    // Self-loops and longer cycles both appear as "start is reachable from
    // one of its own dependencies".
    for dependency in graph.dependencies_of(start) {
        if let Some(path) = path_to(graph, dependency, start) {
            let mut cycle = Vec::with_capacity(path.len() + 1);
            cycle.push(start.clone());
            cycle.extend(path);
            return Some(cycle);
        }
    }
    None
}

/// Whether replacing `cell`'s outgoing edges with `proposed` would close a
/// cycle. Pure query: the graph is not touched, so a rejected formula edit
/// leaves nothing to undo.
///
/// A proposed dependency closes a cycle when it is `cell` itself, or when
/// `cell` is reachable from it along existing depends-on edges. The cell's
/// current outgoing edges never matter here: the traversal stops the
/// moment it reaches `cell`, and those edges are about to be replaced
/// anyway.
pub fn would_create_cycle<K>(graph: &DependencyGraph<K>, cell: &K, proposed: &[K]) -> bool
where
    K: Clone + Eq + Hash,
{
    let mut visited: HashSet<&K> = HashSet::new();
    let mut stack: Vec<&K> = Vec::new();

    for dependency in proposed {
        if dependency == cell {
            return true;
        }
        if visited.insert(dependency) {
            stack.push(dependency);
        }
    }

    while let Some(current) = stack.pop() {
        for next in graph.dependencies_of(current) {
            if next == cell {
                return true;
            }
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }
    false
}

/// Iterative DFS over depends-on edges. Returns the path `[from, ..., target]`
/// if `target` is reachable from `from`.
fn path_to<K>(graph: &DependencyGraph<K>, from: &K, target: &K) -> Option<Vec<K>>
where
    K: Clone + Eq + Hash,
{
    if from == target {
        return Some(vec![from.clone()]);
    }

    let mut parent: HashMap<K, K> = HashMap::new();
    let mut visited: HashSet<K> = HashSet::new();
    let mut stack = vec![from.clone()];
    visited.insert(from.clone());

    while let Some(current) = stack.pop() {
        for next in graph.dependencies_of(&current) {
            if next == target {
                let mut path = vec![current.clone()];
                let mut node = current.clone();
                while let Some(previous) = parent.get(&node) {
                    path.push(previous.clone());
                    node = previous.clone();
                }
                path.reverse();
                path.push(target.clone());
                return Some(path);
            }
            if visited.insert(next.clone()) {
                parent.insert(next.clone(), current.clone());
                stack.push(next.clone());
            }
        }
    }
    None
}
