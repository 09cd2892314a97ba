//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::engine::{CellRef, UnresolvedCells};

/// Errors that can occur in the document edit pipeline
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("Circular dependency detected")]
    CircularDependency,

    #[error("Recalculation could not be fully ordered: {0}")]
    UnresolvedRecalc(#[from] UnresolvedCells<CellRef>),
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
