//! Dual-indexed dependency storage for formula cells.
//!
//! For every cell the graph stores the set of cells its formula reads
//! (`depends_on`) and, inverted, the set of cells whose formulas read it
//! (`dependents`). Keeping both directions makes lookups O(1) either way
//! on the recalculation path; the cost is that every mutation must update
//! the two indexes together, so edge changes happen only inside
//! [`DependencyGraph::add_dependency`] and
//! [`DependencyGraph::remove_dependencies`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Directed dependency graph keyed by an opaque cell identifier.
///
/// The key type only needs equality, hashing, and cloning; the graph never
/// looks inside it, so any addressing scheme (sheet-qualified or not) can
/// be layered on top. Cells with no edges in either direction are not
/// stored at all - querying an unknown cell yields empty results, never an
/// error.
#[derive(Debug, Clone)]
pub struct DependencyGraph<K> {
    /// cell -> cells its formula reads
    depends_on: HashMap<K, HashSet<K>>,
    /// cell -> cells whose formulas read it (inverse index)
    dependents: HashMap<K, HashSet<K>>,
}

impl<K> Default for DependencyGraph<K> {
    fn default() -> Self {
        DependencyGraph {
            depends_on: HashMap::new(),
            dependents: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> DependencyGraph<K> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent`'s formula reads `dependency`.
    ///
    /// Adding an edge that already exists has no further effect.
    pub fn add_dependency(&mut self, dependent: K, dependency: K) {
        self.dependents
            .entry(dependency.clone())
            .or_default()
            .insert(dependent.clone());
        self.depends_on.entry(dependent).or_default().insert(dependency);
        self.debug_assert_inverse();
    }

    /// Remove every outgoing edge from `dependent`, including the matching
    /// entries in the inverse index. Used when a formula is replaced or
    /// cleared. Edges owned by other cells are untouched.
    pub fn remove_dependencies(&mut self, dependent: &K) {
        let Some(dependencies) = self.depends_on.remove(dependent) else {
            return;
        };
        for dependency in dependencies {
            if let Some(set) = self.dependents.get_mut(&dependency) {
                set.remove(dependent);
                if set.is_empty() {
                    self.dependents.remove(&dependency);
                }
            }
        }
        self.debug_assert_inverse();
    }

    /// The cells `cell` currently reads. Empty for an unknown cell.
    pub fn dependencies_of(&self, cell: &K) -> impl Iterator<Item = &K> {
        self.depends_on.get(cell).into_iter().flatten()
    }

    /// The cells that currently read `cell`. Empty for an unknown cell.
    pub fn direct_dependents_of(&self, cell: &K) -> impl Iterator<Item = &K> {
        self.dependents.get(cell).into_iter().flatten()
    }

    /// Whether the edge `dependent -> dependency` is currently recorded.
    pub fn has_dependency(&self, dependent: &K, dependency: &K) -> bool {
        self.depends_on
            .get(dependent)
            .is_some_and(|set| set.contains(dependency))
    }

    /// Number of cells tracked in either direction. Diagnostics only; no
    /// scheduling decision reads this.
    pub fn len(&self) -> usize {
        let inverse_only = self
            .dependents
            .keys()
            .filter(|cell| !self.depends_on.contains_key(*cell))
            .count();
        self.depends_on.len() + inverse_only
    }

    pub fn is_empty(&self) -> bool {
        self.depends_on.is_empty() && self.dependents.is_empty()
    }

    /// Reset the graph to empty, e.g. when a different document is loaded.
    pub fn clear(&mut self) {
        self.depends_on.clear();
        self.dependents.clear();
    }

    /// The two indexes must be exact inverses and hold no empty sets. Any
    /// divergence is a defect in this module's mutation paths, not a state
    /// to recover from.
    fn debug_assert_inverse(&self) {
        #[cfg(debug_assertions)]
        {
            for (dependent, dependencies) in &self.depends_on {
                debug_assert!(!dependencies.is_empty(), "empty depends_on set was not pruned");
                for dependency in dependencies {
                    debug_assert!(
                        self.dependents
                            .get(dependency)
                            .is_some_and(|set| set.contains(dependent)),
                        "forward edge missing from inverse index"
                    );
                }
            }
            for (dependency, dependents) in &self.dependents {
                debug_assert!(!dependents.is_empty(), "empty dependents set was not pruned");
                for dependent in dependents {
                    debug_assert!(
                        self.depends_on
                            .get(dependent)
                            .is_some_and(|set| set.contains(dependency)),
                        "inverse edge missing from forward index"
                    );
                }
            }
        }
    }
}
