//! gridcalc-core - UI-agnostic document edit pipeline.
//!
//! Owns the per-document dependency state and orchestrates the engine for
//! the host's formula evaluator: commit a formula's reference list, reject
//! circular references, and hand back the order in which affected cells
//! must be re-evaluated.

pub mod document;
pub mod error;

pub use document::Document;
pub use error::{GridcalcError, Result};

pub use gridcalc_engine::engine::CellRef;
