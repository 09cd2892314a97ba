//! Recalculation engine API.
//!
//! This module provides the dependency-tracking core for the spreadsheet:
//!
//! - [`DependencyGraph`] - Dual-indexed depends-on / dependents storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`detect_cycle`], [`would_create_cycle`] - Circular reference detection
//! - [`all_dependents`], [`recalculation_order`] - Recalculation scheduling

mod cell_ref;
mod cycle;
mod graph;
mod schedule;

pub use cell_ref::CellRef;
pub use cycle::{detect_cycle, would_create_cycle};
pub use graph::DependencyGraph;
pub use schedule::{UnresolvedCells, all_dependents, recalculation_order};
