//! Error handling for ecsfit-store
//!
//! Wraps ecsfit-core ExError with store-specific helpers

use ecsfit_core::errors::{ExError, FieldCheckError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a cache I/O error
pub fn cache_io(op: &str, path: &Path, err: std::io::Error) -> ExError {
    FieldCheckError::cache_io(op, path, &err).into()
}

/// Create a package I/O error (listing or reading package directories)
pub fn package_io(op: &str, path: &Path, err: std::io::Error) -> ExError {
    FieldCheckError::PackageIo {
        op: op.to_string(),
        path: path.display().to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// Create an invalid data stream name error
pub fn invalid_data_stream(data_stream: &str) -> ExError {
    FieldCheckError::InvalidDataStream {
        data_stream: data_stream.to_string(),
    }
    .into()
}

/// Create a schema unavailable error (source has no such version)
pub fn schema_unavailable(version: &str, url: &str) -> ExError {
    FieldCheckError::SchemaUnavailable {
        version: version.to_string(),
        url: url.to_string(),
    }
    .into()
}

/// Create a schema parse error for an artifact on disk
pub fn schema_parse(version: &str, path: &Path, reason: impl ToString) -> ExError {
    FieldCheckError::SchemaParse {
        version: version.to_string(),
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Create an invalid version error
pub fn invalid_version(version: &str) -> ExError {
    FieldCheckError::InvalidVersion {
        version: version.to_string(),
    }
    .into()
}

/// Create a data stream not found error
pub fn data_stream_not_found(data_stream: &str, path: &Path) -> ExError {
    FieldCheckError::DataStreamNotFound {
        data_stream: data_stream.to_string(),
        path: path.display().to_string(),
    }
    .into()
}

/// Create a per-file field parse error
pub fn field_file_parse(path: &Path, reason: impl ToString) -> ExError {
    FieldCheckError::FieldFileParse {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Create an invalid package error
pub fn invalid_package(path: &Path, reason: impl ToString) -> ExError {
    FieldCheckError::InvalidPackage {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Create a manifest read error
pub fn manifest_read(path: &Path, reason: impl ToString) -> ExError {
    FieldCheckError::ManifestRead {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}
