use gridcalc_engine::engine::{CellRef, DependencyGraph};

/// Per-document dependency state for the spreadsheet.
///
/// Holds cell identifiers and the edges between them, nothing else: cell
/// values, formula text, and rendering all live with the host. One
/// `Document` is created per open document and lives for the whole
/// session; [`clear`](Document::clear) resets it when a different document
/// is loaded.
///
/// All mutation arrives through the host's serialized edit pipeline (one
/// user or remote edit at a time). A host with concurrent writers must
/// serialize access externally.
pub struct Document {
    /// Formula dependency graph, keyed by cell reference
    pub(crate) graph: DependencyGraph<CellRef>,
}

impl Document {
    /// Create an empty document state.
    pub fn new() -> Self {
        Document {
            graph: DependencyGraph::new(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
