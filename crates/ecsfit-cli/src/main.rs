//! ecsfit CLI
//!
//! Command-line interface for reconciling package fields against the
//! canonical schema

use clap::{Parser, Subcommand, ValueEnum};
use ecsfit_core::logging_facility::{init, Profile};

mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(name = "ecsfit")]
#[command(about = "ecsfit - Check package field definitions against the canonical schema", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile a package's fields against a schema version
    Check(commands::check::CheckArgs),
    /// Schema cache maintenance
    Cache(commands::cache::CacheArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Cache(args) => commands::cache::execute(args).map(|_| commands::Outcome::Clean),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
