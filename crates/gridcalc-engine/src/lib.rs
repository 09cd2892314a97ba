//! gridcalc-engine - dependency graph and recalculation scheduling.

pub mod engine;
