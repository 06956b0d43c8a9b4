//! ecsfit Engine - Orchestration layer
//!
//! Runs a full package check: read field documents, flatten them, load the
//! canonical dictionary and reconcile each data stream.

pub mod commands;

pub use commands::check::{
    check_package, CheckOptions, DataStreamReport, PackageReport, ReportWarning,
    DEFAULT_SCHEMA_VERSION,
};
