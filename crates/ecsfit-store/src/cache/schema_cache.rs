//! Versioned on-disk cache of canonical schema dictionaries
//!
//! Layout: `<cache_root>/<version>/ecs_flat.yml`, holding the artifact
//! exactly as fetched. A cached artifact is trusted until removed; there
//! is no freshness check.

use crate::cache::atomic::atomic_write;
use crate::cache::config::{SchemaCacheConfig, SCHEMA_ARTIFACT_FILE};
use crate::errors::{cache_io, invalid_version, schema_parse, Result};
use crate::source::{HttpSchemaSource, SchemaSource};
use ecsfit_core::core_types::schema::{EVENT_CACHE_HIT, EVENT_CACHE_MISS};
use ecsfit_core::model::{CanonicalFieldRecord, SchemaDictionary};
use ecsfit_core::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Maps a version identifier to its canonical dictionary
pub struct SchemaCache<S = HttpSchemaSource> {
    config: SchemaCacheConfig,
    source: S,
}

impl SchemaCache<HttpSchemaSource> {
    /// Cache backed by the HTTP source described by `config`
    pub fn http(config: SchemaCacheConfig) -> Result<Self> {
        let source = HttpSchemaSource::from_config(&config)?;
        Ok(Self::new(config, source))
    }
}

impl<S: SchemaSource> SchemaCache<S> {
    pub fn new(config: SchemaCacheConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &SchemaCacheConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Directory holding the artifact for `version`
    pub fn version_dir(&self, version: &str) -> Result<PathBuf> {
        validate_version(version)?;
        Ok(self.config.cache_root.join(version))
    }

    /// Path of the cached artifact for `version`
    pub fn artifact_path(&self, version: &str) -> Result<PathBuf> {
        Ok(self.version_dir(version)?.join(SCHEMA_ARTIFACT_FILE))
    }

    pub fn is_cached(&self, version: &str) -> Result<bool> {
        Ok(self.artifact_path(version)?.is_file())
    }

    /// Get the dictionary for `version`, fetching and persisting on a miss.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an unusable version identifier
    /// - `SchemaUnavailable` / `SchemaFetch` from the source on a miss
    /// - `CacheIo` when the cache cannot be created, read or written
    /// - `SchemaParse` when the artifact (cached or fresh) is malformed;
    ///   the artifact is left in place for inspection
    pub fn get(&self, version: &str) -> Result<SchemaDictionary> {
        let started = Instant::now();
        log_op_start!("schema_cache_get", schema_version = version);

        let result = self.load(version);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(dictionary) => log_op_end!(
                "schema_cache_get",
                duration_ms = duration_ms,
                schema_version = version,
                dictionary_len = dictionary.len()
            ),
            Err(err) => log_op_error!(
                "schema_cache_get",
                err.clone(),
                duration_ms = duration_ms,
                schema_version = version
            ),
        }
        result
    }

    fn load(&self, version: &str) -> Result<SchemaDictionary> {
        let path = self.artifact_path(version)?;

        let content = if path.exists() {
            tracing::debug!(
                op = "schema_cache_get",
                event = EVENT_CACHE_HIT,
                schema_version = version,
                path = %path.display()
            );
            fs::read(&path).map_err(|e| cache_io("read_schema", &path, e))?
        } else {
            tracing::info!(
                op = "schema_cache_get",
                event = EVENT_CACHE_MISS,
                schema_version = version,
                "Downloading schema file for {}",
                version
            );
            let content = self.source.fetch(version)?;
            atomic_write(&path, &content)?;
            content
        };

        parse_dictionary(version, &path, &content)
    }

    /// Remove the cached artifact for `version`, if any
    pub fn clear(&self, version: &str) -> Result<bool> {
        let dir = self.version_dir(version)?;
        remove_dir_if_present(&dir)
    }

    /// Remove every cached version
    pub fn clear_all(&self) -> Result<bool> {
        remove_dir_if_present(&self.config.cache_root)
    }
}

fn remove_dir_if_present(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(dir).map_err(|e| cache_io("clear_cache", dir, e))?;
    Ok(true)
}

/// Reject identifiers that could escape or alias the cache root.
///
/// Slashes are allowed (branch names such as `release/8.x`) and map to
/// nested directories.
pub fn validate_version(version: &str) -> Result<()> {
    if version.trim().is_empty() || version.contains('\\') {
        return Err(invalid_version(version));
    }
    let all_normal = Path::new(version)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    let bad_segment = version
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if !all_normal || bad_segment {
        return Err(invalid_version(version));
    }
    Ok(())
}

/// Parse raw artifact bytes into a dictionary
pub fn parse_dictionary(version: &str, path: &Path, content: &[u8]) -> Result<SchemaDictionary> {
    let fields: Option<BTreeMap<String, CanonicalFieldRecord>> =
        serde_yaml::from_slice(content).map_err(|e| schema_parse(version, path, e))?;
    let fields = fields.ok_or_else(|| schema_parse(version, path, "artifact is empty"))?;
    Ok(SchemaDictionary::new(version, fields))
}
