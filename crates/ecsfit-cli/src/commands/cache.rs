//! Cache command
//!
//! Usage: ecsfit cache clear [--version <REF> | --all], ecsfit cache path

use super::cache_config;
use clap::{Args, Subcommand};
use ecsfit_store::cache::{SchemaCache, SchemaCacheConfig};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Schema cache root (default: ~/.cache/ecsfit)
    #[arg(long, env = "ECSFIT_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Delete cached schema artifacts
    Clear(ClearArgs),
    /// Print the cache root
    Path,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Version to delete
    #[arg(long, conflicts_with = "all", required_unless_present = "all")]
    pub version: Option<String>,

    /// Delete every cached version
    #[arg(long)]
    pub all: bool,
}

/// Execute cache command
pub fn execute(args: CacheArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = cache_config(args.cache_dir, None);
    match args.command {
        CacheCommand::Clear(clear_args) => execute_clear(config, clear_args),
        CacheCommand::Path => {
            println!("{}", config.cache_root.display());
            Ok(())
        }
    }
}

fn execute_clear(
    config: SchemaCacheConfig,
    args: ClearArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let cache = SchemaCache::http(config)?;

    let removed = match &args.version {
        Some(version) => cache.clear(version)?,
        None => cache.clear_all()?,
    };

    let target = args.version.as_deref().unwrap_or("all versions");
    if removed {
        println!("Cleared cached schema: {}", target);
    } else {
        println!("Nothing cached for: {}", target);
    }
    Ok(())
}
