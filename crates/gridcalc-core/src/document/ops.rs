use std::collections::HashSet;

use gridcalc_engine::engine::{
    CellRef, all_dependents, detect_cycle, recalculation_order, would_create_cycle,
};

use super::Document;
use crate::error::{GridcalcError, Result};

impl Document {
    /// Commit a formula's reference list for `cell`.
    ///
    /// The proposed references are checked before any edge changes: a
    /// formula that would read its own output, directly or transitively,
    /// is rejected with [`GridcalcError::CircularDependency`] and the
    /// graph untouched - there is no rollback step because nothing was
    /// written. On success the cell's previous edge set is replaced
    /// wholesale and the recalculation order for the edit is returned.
    ///
    /// An empty reference list is a valid commit (a formula reading only
    /// constants); it clears the cell's outgoing edges.
    pub fn commit_formula(&mut self, cell: CellRef, references: &[CellRef]) -> Result<Vec<CellRef>> {
        if would_create_cycle(&self.graph, &cell, references) {
            tracing::debug!(cell = %cell, "rejected formula commit: circular reference");
            return Err(GridcalcError::CircularDependency);
        }

        self.graph.remove_dependencies(&cell);
        for reference in references {
            self.graph.add_dependency(cell.clone(), reference.clone());
        }
        tracing::debug!(cell = %cell, references = references.len(), "formula committed");

        self.recalculation_order(&cell)
    }

    /// Drop `cell`'s formula (cleared, or the cell deleted). Returns the
    /// recalculation order for the cells that read the now-blank cell.
    pub fn clear_formula(&mut self, cell: &CellRef) -> Result<Vec<CellRef>> {
        self.graph.remove_dependencies(cell);
        tracing::debug!(cell = %cell, "formula cleared");
        self.recalculation_order(cell)
    }

    /// The order in which cells affected by a change to `cell` must be
    /// re-evaluated: every affected cell exactly once, dependencies before
    /// dependents. `cell` itself is not included - the caller re-evaluates
    /// it directly. Also the entry point for plain value edits, which
    /// change no edges.
    pub fn recalculation_order(&self, cell: &CellRef) -> Result<Vec<CellRef>> {
        let order = recalculation_order(&self.graph, cell)?;
        tracing::trace!(cell = %cell, affected = order.len(), "recalculation scheduled");
        Ok(order)
    }

    /// Every cell that directly or transitively reads `cell`.
    pub fn all_dependents(&self, cell: &CellRef) -> HashSet<CellRef> {
        all_dependents(&self.graph, cell)
    }

    /// The cells `cell`'s formula currently reads.
    pub fn dependencies_of(&self, cell: &CellRef) -> Vec<CellRef> {
        self.graph.dependencies_of(cell).cloned().collect()
    }

    /// The cells whose formulas currently read `cell`.
    pub fn direct_dependents_of(&self, cell: &CellRef) -> Vec<CellRef> {
        self.graph.direct_dependents_of(cell).cloned().collect()
    }

    /// Whether `cell` currently sits on a reference cycle, with the
    /// witness path for the host's circular-reference marker. Always None
    /// when every formula went through [`commit_formula`](Document::commit_formula).
    pub fn detect_cycle(&self, cell: &CellRef) -> Option<Vec<CellRef>> {
        detect_cycle(&self.graph, cell)
    }

    /// Number of cells tracked in the graph. Diagnostics only.
    pub fn tracked_cells(&self) -> usize {
        self.graph.len()
    }

    /// Reset all dependency state, e.g. when loading another document.
    pub fn clear(&mut self) {
        self.graph.clear();
        tracing::debug!("dependency state cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    fn index_of(order: &[CellRef], name: &str) -> usize {
        let target = cell(name);
        order
            .iter()
            .position(|c| *c == target)
            .unwrap_or_else(|| panic!("{name} missing from recalculation order"))
    }

    #[test]
    fn test_commit_formula_registers_both_directions() {
        let mut doc = Document::new();
        doc.commit_formula(cell("A1"), &[cell("B1"), cell("C1")]).unwrap();

        assert_eq!(doc.dependencies_of(&cell("A1")).len(), 2);
        assert_eq!(doc.direct_dependents_of(&cell("B1")), vec![cell("A1")]);
        assert_eq!(doc.direct_dependents_of(&cell("C1")), vec![cell("A1")]);
    }

    #[test]
    fn test_commit_formula_replaces_the_previous_edge_set() {
        let mut doc = Document::new();
        doc.commit_formula(cell("A1"), &[cell("B1")]).unwrap();
        doc.commit_formula(cell("A1"), &[cell("C1")]).unwrap();

        assert_eq!(doc.dependencies_of(&cell("A1")), vec![cell("C1")]);
        assert!(doc.direct_dependents_of(&cell("B1")).is_empty());
    }

    #[test]
    fn test_commit_formula_rejects_self_reference() {
        let mut doc = Document::new();
        let result = doc.commit_formula(cell("A1"), &[cell("A1")]);

        assert!(matches!(result, Err(GridcalcError::CircularDependency)));
        assert_eq!(doc.tracked_cells(), 0);
    }

    #[test]
    fn test_rejected_commit_leaves_the_graph_untouched() {
        let mut doc = Document::new();
        doc.commit_formula(cell("B1"), &[cell("A1")]).unwrap();

        // A1 = f(B1) would close the loop.
        let result = doc.commit_formula(cell("A1"), &[cell("B1")]);
        assert!(matches!(result, Err(GridcalcError::CircularDependency)));

        // B1's original formula is still in place, and A1 gained no edges.
        assert_eq!(doc.dependencies_of(&cell("B1")), vec![cell("A1")]);
        assert!(doc.dependencies_of(&cell("A1")).is_empty());
        assert!(doc.detect_cycle(&cell("A1")).is_none());
        assert!(doc.detect_cycle(&cell("B1")).is_none());
    }

    #[test]
    fn test_rejected_recommit_keeps_the_previous_formula() {
        let mut doc = Document::new();
        doc.commit_formula(cell("B1"), &[cell("A1")]).unwrap();
        doc.commit_formula(cell("C1"), &[cell("B1")]).unwrap();

        // Editing B1 to read its own dependent is rejected...
        let result = doc.commit_formula(cell("B1"), &[cell("C1")]);
        assert!(matches!(result, Err(GridcalcError::CircularDependency)));

        // ...and B1 still holds the edge set from its last good commit.
        assert_eq!(doc.dependencies_of(&cell("B1")), vec![cell("A1")]);
    }

    #[test]
    fn test_commit_formula_returns_the_recalculation_order() {
        let mut doc = Document::new();
        doc.commit_formula(cell("B1"), &[cell("A1")]).unwrap();
        doc.commit_formula(cell("C1"), &[cell("B1")]).unwrap();

        // Committing A1's (constant) formula must schedule B1 before C1.
        let order = doc.commit_formula(cell("A1"), &[]).unwrap();
        assert_eq!(order.len(), 2);
        assert!(index_of(&order, "B1") < index_of(&order, "C1"));
    }

    #[test]
    fn test_clear_formula_keeps_unrelated_edges() {
        let mut doc = Document::new();
        doc.commit_formula(cell("A1"), &[cell("B1")]).unwrap();
        doc.commit_formula(cell("C1"), &[cell("B1")]).unwrap();

        doc.clear_formula(&cell("A1")).unwrap();

        assert!(doc.dependencies_of(&cell("A1")).is_empty());
        assert_eq!(doc.direct_dependents_of(&cell("B1")), vec![cell("C1")]);
    }

    #[test]
    fn test_value_edit_schedules_transitive_dependents() {
        let mut doc = Document::new();
        doc.commit_formula(cell("B1"), &[cell("A1")]).unwrap();
        doc.commit_formula(cell("C1"), &[cell("B1")]).unwrap();

        // A1 holds a plain value; typing into it changes no edges.
        let order = doc.recalculation_order(&cell("A1")).unwrap();
        assert_eq!(order.len(), 2);
        assert!(index_of(&order, "B1") < index_of(&order, "C1"));

        let affected = doc.all_dependents(&cell("A1"));
        assert!(affected.contains(&cell("B1")));
        assert!(affected.contains(&cell("C1")));
    }

    #[test]
    fn test_diamond_recalculates_arms_before_join() {
        let mut doc = Document::new();
        doc.commit_formula(cell("B1"), &[cell("A1")]).unwrap();
        doc.commit_formula(cell("C1"), &[cell("A1")]).unwrap();
        doc.commit_formula(cell("D1"), &[cell("B1"), cell("C1")]).unwrap();

        let order = doc.recalculation_order(&cell("A1")).unwrap();
        assert_eq!(order.len(), 3);
        assert!(index_of(&order, "B1") < index_of(&order, "D1"));
        assert!(index_of(&order, "C1") < index_of(&order, "D1"));
    }

    #[test]
    fn test_queries_on_unknown_cells_are_empty() {
        let doc = Document::new();

        assert!(doc.dependencies_of(&cell("Q7")).is_empty());
        assert!(doc.direct_dependents_of(&cell("Q7")).is_empty());
        assert!(doc.all_dependents(&cell("Q7")).is_empty());
        assert!(doc.recalculation_order(&cell("Q7")).unwrap().is_empty());
    }

    #[test]
    fn test_clear_resets_all_state() {
        let mut doc = Document::new();
        doc.commit_formula(cell("A1"), &[cell("B1")]).unwrap();
        doc.commit_formula(cell("C1"), &[cell("A1")]).unwrap();
        assert_eq!(doc.tracked_cells(), 3);

        doc.clear();

        assert_eq!(doc.tracked_cells(), 0);
        assert!(doc.dependencies_of(&cell("A1")).is_empty());
        assert!(doc.direct_dependents_of(&cell("B1")).is_empty());
    }
}
