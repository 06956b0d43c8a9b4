//! Subcommand implementations

pub mod cache;
pub mod check;

use ecsfit_store::cache::SchemaCacheConfig;
use std::path::PathBuf;

/// How a successful command run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// Conflicts were found and the caller asked to fail on them
    ConflictsFound,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::ConflictsFound => 2,
        }
    }
}

/// Cache configuration from CLI overrides, defaults elsewhere
pub fn cache_config(cache_dir: Option<PathBuf>, schema_url: Option<String>) -> SchemaCacheConfig {
    let mut config = SchemaCacheConfig::default();
    if let Some(dir) = cache_dir {
        config = config.with_cache_root(dir);
    }
    if let Some(url) = schema_url {
        config = config.with_schema_source_template(url);
    }
    config
}
