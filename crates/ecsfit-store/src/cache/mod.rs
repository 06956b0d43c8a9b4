//! Canonical schema cache
//!
//! Provides:
//! - Explicit cache configuration (source template, cache root)
//! - Versioned on-disk cache with atomic writes
//! - Dictionary parsing of raw artifacts

mod atomic;
mod config;
mod schema_cache;

pub use atomic::atomic_write;
pub use config::{
    default_cache_root, SchemaCacheConfig, DEFAULT_SCHEMA_SOURCE_TEMPLATE, SCHEMA_ARTIFACT_FILE,
    VERSION_PLACEHOLDER,
};
pub use schema_cache::{parse_dictionary, validate_version, SchemaCache};
