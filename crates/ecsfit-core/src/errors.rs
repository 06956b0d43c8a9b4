use std::path::Path;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and machine-readable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidPackage,

    // Canonical schema
    /// The schema source has no artifact for the requested version
    SchemaUnavailable,
    /// Transport or HTTP status failure other than not-found
    SchemaFetch,
    /// A cached (or freshly fetched) artifact is not a valid dictionary
    SchemaParse,
    /// The local cache directory cannot be created, read, or written
    CacheIo,

    // Package field definitions
    DataStreamNotFound,
    /// One field-definition document is malformed (collected, not fatal)
    FieldFileParse,
    /// The package manifest is missing or malformed (collected, not fatal)
    ManifestRead,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidPackage => "ERR_INVALID_PACKAGE",
            ExErrorKind::SchemaUnavailable => "ERR_SCHEMA_UNAVAILABLE",
            ExErrorKind::SchemaFetch => "ERR_SCHEMA_FETCH",
            ExErrorKind::SchemaParse => "ERR_SCHEMA_PARSE",
            ExErrorKind::CacheIo => "ERR_CACHE_IO",
            ExErrorKind::DataStreamNotFound => "ERR_DATA_STREAM_NOT_FOUND",
            ExErrorKind::FieldFileParse => "ERR_FIELD_FILE_PARSE",
            ExErrorKind::ManifestRead => "ERR_MANIFEST_READ",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind aborts a reconciliation run.
    ///
    /// Per-file and per-manifest problems are accumulated as warnings and
    /// the run continues with whatever parsed.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExErrorKind::FieldFileParse | ExErrorKind::ManifestRead
        )
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context (operation,
/// filesystem path or URL, schema version) for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    version: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            version: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path (file, directory or URL) context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add schema version context
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error aborts a run (see [`ExErrorKind::is_fatal`])
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for field reconciliation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldCheckError {
    /// Version identifier cannot be used as a cache key or URL ref
    #[error("Invalid schema version identifier: {version:?}")]
    InvalidVersion { version: String },

    /// Data stream name is not a single directory name
    #[error("Invalid data stream name: {data_stream:?}")]
    InvalidDataStream { data_stream: String },

    /// The package root is not a usable package directory
    #[error("Invalid package at {path}: {reason}")]
    InvalidPackage { path: String, reason: String },

    /// The schema source returned not-found for the version
    #[error("Unsatisfied schema dependency: version {version} not found at {url}")]
    SchemaUnavailable { version: String, url: String },

    /// Transport or HTTP failure while fetching the schema
    #[error("Unable to fetch schema {version} from {url}: {reason}")]
    SchemaFetch {
        version: String,
        url: String,
        reason: String,
    },

    /// The schema artifact could not be parsed into a dictionary
    #[error("Schema artifact for {version} at {path} is not a valid dictionary: {reason}")]
    SchemaParse {
        version: String,
        path: String,
        reason: String,
    },

    /// Package directory exists but cannot be listed or read
    #[error("Package I/O failure during {op} on {path}: {reason}")]
    PackageIo {
        op: String,
        path: String,
        reason: String,
    },

    /// Local cache filesystem failure
    #[error("Cache I/O failure during {op} on {path}: {reason}")]
    CacheIo {
        op: String,
        path: String,
        reason: String,
    },

    /// The data stream has no fields directory
    #[error("Data stream {data_stream} has no fields directory at {path}")]
    DataStreamNotFound { data_stream: String, path: String },

    /// A field-definition document is malformed
    #[error("Error reading fields from {path}: {reason}")]
    FieldFileParse { path: String, reason: String },

    /// The package manifest is missing or malformed
    #[error("Error reading manifest {path}: {reason}")]
    ManifestRead { path: String, reason: String },
}

impl FieldCheckError {
    /// Build a cache I/O error from a filesystem failure
    pub fn cache_io(op: &str, path: &Path, err: &std::io::Error) -> Self {
        FieldCheckError::CacheIo {
            op: op.to_string(),
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<FieldCheckError> for ExError {
    fn from(err: FieldCheckError) -> Self {
        let message = err.to_string();
        match err {
            FieldCheckError::InvalidVersion { version } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("validate_version")
                .with_version(version)
                .with_message(message),

            FieldCheckError::InvalidDataStream { data_stream } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("validate_data_stream")
                    .with_path(data_stream)
                    .with_message(message)
            }

            FieldCheckError::PackageIo { op, path, .. } => {
                ExError::new(ExErrorKind::InvalidPackage)
                    .with_op(op)
                    .with_path(path)
                    .with_message(message)
            }

            FieldCheckError::InvalidPackage { path, .. } => {
                ExError::new(ExErrorKind::InvalidPackage)
                    .with_op("open_package")
                    .with_path(path)
                    .with_message(message)
            }

            FieldCheckError::SchemaUnavailable { version, url } => {
                ExError::new(ExErrorKind::SchemaUnavailable)
                    .with_op("schema_fetch")
                    .with_version(version)
                    .with_path(url)
                    .with_message(message)
            }

            FieldCheckError::SchemaFetch { version, url, .. } => {
                ExError::new(ExErrorKind::SchemaFetch)
                    .with_op("schema_fetch")
                    .with_version(version)
                    .with_path(url)
                    .with_message(message)
            }

            FieldCheckError::SchemaParse { version, path, .. } => {
                ExError::new(ExErrorKind::SchemaParse)
                    .with_op("schema_parse")
                    .with_version(version)
                    .with_path(path)
                    .with_message(message)
            }

            FieldCheckError::CacheIo { op, path, .. } => ExError::new(ExErrorKind::CacheIo)
                .with_op(op)
                .with_path(path)
                .with_message(message),

            FieldCheckError::DataStreamNotFound { path, .. } => {
                ExError::new(ExErrorKind::DataStreamNotFound)
                    .with_op("read_fields")
                    .with_path(path)
                    .with_message(message)
            }

            FieldCheckError::FieldFileParse { path, .. } => {
                ExError::new(ExErrorKind::FieldFileParse)
                    .with_op("read_field_file")
                    .with_path(path)
                    .with_message(message)
            }

            FieldCheckError::ManifestRead { path, .. } => ExError::new(ExErrorKind::ManifestRead)
                .with_op("read_manifest")
                .with_path(path)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidPackage,
            ExErrorKind::SchemaUnavailable,
            ExErrorKind::SchemaFetch,
            ExErrorKind::SchemaParse,
            ExErrorKind::CacheIo,
            ExErrorKind::DataStreamNotFound,
            ExErrorKind::FieldFileParse,
            ExErrorKind::ManifestRead,
            ExErrorKind::Internal,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_only_per_file_kinds_are_recoverable() {
        assert!(!ExErrorKind::FieldFileParse.is_fatal());
        assert!(!ExErrorKind::ManifestRead.is_fatal());
        assert!(ExErrorKind::SchemaUnavailable.is_fatal());
        assert!(ExErrorKind::SchemaFetch.is_fatal());
        assert!(ExErrorKind::CacheIo.is_fatal());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::CacheIo)
            .with_op("write_schema")
            .with_path("/tmp/cache/main/ecs_flat.yml")
            .with_message("permission denied");

        let text = err.to_string();
        assert!(text.starts_with("[ERR_CACHE_IO]"));
        assert!(text.contains("write_schema"));
        assert!(text.contains("permission denied"));
        assert!(text.contains("/tmp/cache/main/ecs_flat.yml"));
    }

    #[test]
    fn test_schema_parse_is_distinct_from_fetch() {
        let parse: ExError = FieldCheckError::SchemaParse {
            version: "8.11".to_string(),
            path: "/c/8.11/ecs_flat.yml".to_string(),
            reason: "bad".to_string(),
        }
        .into();
        let fetch: ExError = FieldCheckError::SchemaFetch {
            version: "8.11".to_string(),
            url: "https://example.invalid".to_string(),
            reason: "timeout".to_string(),
        }
        .into();

        assert_eq!(parse.kind(), ExErrorKind::SchemaParse);
        assert_eq!(fetch.kind(), ExErrorKind::SchemaFetch);
        assert_eq!(parse.path(), Some("/c/8.11/ecs_flat.yml"));
        assert_eq!(parse.version(), Some("8.11"));
    }
}
