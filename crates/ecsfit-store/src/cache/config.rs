//! Schema cache configuration

use std::path::PathBuf;

/// Default location of the canonical flat schema, `{version}` is a git ref
pub const DEFAULT_SCHEMA_SOURCE_TEMPLATE: &str =
    "https://raw.githubusercontent.com/elastic/ecs/{version}/generated/ecs/ecs_flat.yml";

/// Placeholder replaced by the version identifier in a source template
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// File name of the cached artifact inside each version directory
pub const SCHEMA_ARTIFACT_FILE: &str = "ecs_flat.yml";

/// Explicit configuration handed to [`SchemaCache`](super::SchemaCache)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCacheConfig {
    /// URL pattern containing `{version}`
    pub schema_source_template: String,
    /// Root directory holding one subdirectory per version
    pub cache_root: PathBuf,
}

impl Default for SchemaCacheConfig {
    fn default() -> Self {
        Self {
            schema_source_template: DEFAULT_SCHEMA_SOURCE_TEMPLATE.to_string(),
            cache_root: default_cache_root(),
        }
    }
}

impl SchemaCacheConfig {
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    pub fn with_schema_source_template(mut self, template: impl Into<String>) -> Self {
        self.schema_source_template = template.into();
        self
    }

    /// Expand the source template for `version`
    pub fn source_url(&self, version: &str) -> String {
        self.schema_source_template
            .replace(VERSION_PLACEHOLDER, version)
    }
}

/// `<home>/.cache/ecsfit`, or `./.cache/ecsfit` when no home is known
pub fn default_cache_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("ecsfit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_url_expands_version() {
        let config = SchemaCacheConfig::default();
        assert_eq!(
            config.source_url("v8.11.0"),
            "https://raw.githubusercontent.com/elastic/ecs/v8.11.0/generated/ecs/ecs_flat.yml"
        );
    }

    #[test]
    fn test_default_cache_root_is_namespaced() {
        let root = default_cache_root();
        assert!(root.ends_with(".cache/ecsfit"));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = SchemaCacheConfig::default()
            .with_cache_root("/tmp/ecsfit-cache")
            .with_schema_source_template("http://localhost:8080/{version}.yml");

        assert_eq!(config.cache_root, PathBuf::from("/tmp/ecsfit-cache"));
        assert_eq!(config.source_url("main"), "http://localhost:8080/main.yml");
    }
}
