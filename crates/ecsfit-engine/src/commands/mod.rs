//! Command orchestration layer.
//!
//! Coordinates the pure reconciliation kernel with the I/O layer.

pub mod check;
