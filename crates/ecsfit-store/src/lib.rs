//! ecsfit Store - every filesystem and network touch point
//!
//! Provides:
//! - Versioned on-disk cache of canonical schema dictionaries
//! - Schema sources (HTTP fetch of the canonical artifact)
//! - Field Tree Reader for package data streams
//! - Package root checks, manifest info and data stream discovery

pub mod cache;
pub mod errors;
pub mod fields;
pub mod package;
pub mod source;

// Re-export key types
pub use cache::{SchemaCache, SchemaCacheConfig};
pub use errors::Result;
pub use fields::{read_data_stream, read_field_file, FieldTreeSet};
pub use package::{
    ensure_package_root, list_data_streams, read_package_info, validate_data_stream_name,
    PackageInfo,
};
pub use source::{HttpSchemaSource, SchemaSource};
