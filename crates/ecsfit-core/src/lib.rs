//! ecsfit Core - pure field reconciliation kernel
//!
//! This crate provides:
//! - The field data model: nested [`FieldNode`] trees, flattened
//!   [`FlatFieldRecord`]s and the canonical [`SchemaDictionary`]
//! - Flattening of nested trees into dotted-path records
//! - Reconciliation of flattened records against a canonical dictionary
//! - The structured error facility and logging facility shared by all crates
//!
//! Nothing in this crate performs I/O.

pub mod errors;
pub mod flatten;
pub mod logging_facility;
pub mod model;
pub mod reconcile;

pub use ecsfit_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, FieldCheckError, Result};
pub use flatten::{duplicate_paths, flatten, flatten_tree};
pub use model::{
    CanonicalFieldRecord, Classification, FieldNode, FieldTree, FlatFieldRecord,
    ReconciliationEntry, ReconciliationSummary, SchemaDictionary,
};
pub use reconcile::{
    canonical_unused, classify_records, reconcile, reconcile_with, ReconcileOptions, TypePolicy,
};
