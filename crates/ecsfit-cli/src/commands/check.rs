//! Check command
//!
//! Usage: ecsfit check [--package-path <DIR>] [--ecs-git-ref <REF>] [--format table|json]

use super::{cache_config, Outcome};
use crate::render::{render_json, render_table, RenderOptions};
use clap::{Args, ValueEnum};
use ecsfit_core::{ReconcileOptions, TypePolicy};
use ecsfit_engine::{check_package, CheckOptions, DEFAULT_SCHEMA_VERSION};
use ecsfit_store::SchemaCache;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Package root directory
    #[arg(long, default_value = ".")]
    pub package_path: PathBuf,

    /// Canonical schema version (git ref of the schema repository)
    #[arg(long, default_value = DEFAULT_SCHEMA_VERSION)]
    pub ecs_git_ref: String,

    /// Schema cache root (default: ~/.cache/ecsfit)
    #[arg(long, env = "ECSFIT_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Schema source URL template containing `{version}`
    #[arg(long, env = "ECSFIT_SCHEMA_URL")]
    pub schema_url: Option<String>,

    #[arg(long, value_enum, default_value_t = TypePolicyArg::Strict)]
    pub type_policy: TypePolicyArg,

    /// Only check these data streams (repeatable; default: all)
    #[arg(long = "data-stream")]
    pub data_streams: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also list canonical fields the package never uses
    #[arg(long)]
    pub show_unused: bool,

    /// Exit with status 2 when any conflict is found
    #[arg(long)]
    pub fail_on_conflict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypePolicyArg {
    Strict,
    Family,
}

impl From<TypePolicyArg> for TypePolicy {
    fn from(arg: TypePolicyArg) -> Self {
        match arg {
            TypePolicyArg::Strict => TypePolicy::Strict,
            TypePolicyArg::Family => TypePolicy::Family,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let cache = SchemaCache::http(cache_config(args.cache_dir, args.schema_url))?;

    let options = CheckOptions {
        version: args.ecs_git_ref,
        data_streams: args.data_streams,
        reconcile: ReconcileOptions {
            type_policy: args.type_policy.into(),
        },
    };
    let report = check_package(&cache, &args.package_path, &options)?;

    let render_options = RenderOptions {
        show_unused: args.show_unused,
    };
    let output = match args.format {
        OutputFormat::Table => render_table(&report, &render_options),
        OutputFormat::Json => render_json(&report, &render_options)?,
    };
    print!("{}", output);

    if args.fail_on_conflict && report.has_conflicts() {
        Ok(Outcome::ConflictsFound)
    } else {
        Ok(Outcome::Clean)
    }
}
