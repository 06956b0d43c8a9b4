//! Package check orchestration.
//!
//! ## Pipeline (in order):
//! 1. Package root sanity check (hard stop)
//! 2. Manifest info (warning on failure)
//! 3. Data stream selection: discovered or explicitly requested
//! 4. Read and flatten each data stream (per-file failures become warnings)
//! 5. Load the canonical dictionary once (hard stop)
//! 6. Classify each data stream's fields
//! 7. Report canonical paths unused by the package as a whole

use ecsfit_core::errors::{ExError, ExErrorKind};
use ecsfit_core::model::{FlatFieldRecord, ReconciliationEntry, ReconciliationSummary};
use ecsfit_core::{
    canonical_unused, classify_records, duplicate_paths, flatten, log_op_end, log_op_error,
    log_op_start, ReconcileOptions,
};
use ecsfit_store::errors::Result;
use ecsfit_store::package::{ensure_package_root, list_data_streams, read_package_info};
use ecsfit_store::{read_data_stream, PackageInfo, SchemaCache, SchemaSource};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Schema version used when none is requested
pub const DEFAULT_SCHEMA_VERSION: &str = "main";

/// Options for a package check.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Version identifier of the canonical schema (a git ref)
    pub version: String,
    /// Data streams to check; empty means every discovered data stream
    pub data_streams: Vec<String>,
    pub reconcile: ReconcileOptions,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_SCHEMA_VERSION.to_string(),
            data_streams: Vec::new(),
            reconcile: ReconcileOptions::default(),
        }
    }
}

impl CheckOptions {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_data_stream(mut self, data_stream: impl Into<String>) -> Self {
        self.data_streams.push(data_stream.into());
        self
    }
}

/// A recoverable problem met during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ExError> for ReportWarning {
    fn from(err: &ExError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message().to_string(),
            path: err.path().map(str::to_string),
        }
    }
}

/// Reconciliation of one data stream
#[derive(Debug, Clone, Serialize)]
pub struct DataStreamReport {
    pub name: String,
    pub summary: ReconciliationSummary,
    /// Paths defined more than once across the stream's files
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub duplicates: BTreeMap<String, usize>,
    pub entries: Vec<ReconciliationEntry>,
}

/// Result of checking one package against one schema version
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageInfo>,
    pub schema_version: String,
    pub data_streams: Vec<DataStreamReport>,
    /// Canonical paths no data stream of the package references
    pub unused: Vec<ReconciliationEntry>,
    pub warnings: Vec<ReportWarning>,
}

impl PackageReport {
    /// Package-wide counts: every data stream's rows plus the
    /// package-level unused canonical paths
    pub fn totals(&self) -> ReconciliationSummary {
        let mut totals = ReconciliationSummary::from_entries(&self.unused);
        for ds in &self.data_streams {
            totals.merge(&ds.summary);
        }
        totals
    }

    pub fn has_conflicts(&self) -> bool {
        self.data_streams.iter().any(|ds| ds.summary.has_conflicts())
    }
}

/// Check every selected data stream of a package against the canonical
/// dictionary.
///
/// # Errors
///
/// - `InvalidPackage` when the root is not a package
/// - `DataStreamNotFound` when an explicitly requested data stream has no
///   fields directory
/// - any Schema Cache error for the requested version
///
/// Malformed field files, a missing manifest and discovered data streams
/// without fields are reported as warnings instead.
pub fn check_package<S: SchemaSource>(
    cache: &SchemaCache<S>,
    package_root: &Path,
    options: &CheckOptions,
) -> Result<PackageReport> {
    let started = Instant::now();
    let package = package_root.display().to_string();
    log_op_start!(
        "check_package",
        package = package.as_str(),
        schema_version = options.version.as_str()
    );

    let result = run_check(cache, package_root, options);
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(report) => log_op_end!(
            "check_package",
            duration_ms = duration_ms,
            package = package.as_str(),
            schema_version = options.version.as_str(),
            warnings = report.warnings.len()
        ),
        Err(err) => log_op_error!(
            "check_package",
            err.clone(),
            duration_ms = duration_ms,
            package = package.as_str()
        ),
    }
    result
}

fn run_check<S: SchemaSource>(
    cache: &SchemaCache<S>,
    package_root: &Path,
    options: &CheckOptions,
) -> Result<PackageReport> {
    ensure_package_root(package_root)?;
    let mut warnings: Vec<ReportWarning> = Vec::new();

    let package = match read_package_info(package_root) {
        Ok(info) => Some(info),
        Err(err) if !err.is_fatal() => {
            tracing::warn!(op = "check_package", err_code = err.code(), "{}", err);
            warnings.push(ReportWarning::from(&err));
            None
        }
        Err(err) => return Err(err),
    };

    let explicit = !options.data_streams.is_empty();
    let names = if explicit {
        options.data_streams.clone()
    } else {
        list_data_streams(package_root)?
    };

    let mut streams: Vec<(String, Vec<FlatFieldRecord>)> = Vec::with_capacity(names.len());
    for name in names {
        let set = match read_data_stream(package_root, &name) {
            Ok(set) => set,
            Err(err) if !explicit && err.kind() == ExErrorKind::DataStreamNotFound => {
                tracing::warn!(op = "check_package", data_stream = name.as_str(), "{}", err);
                warnings.push(ReportWarning::from(&err));
                continue;
            }
            Err(err) => return Err(err),
        };
        warnings.extend(set.errors.iter().map(ReportWarning::from));
        streams.push((name, flatten(&set.trees)));
    }

    let dictionary = cache.get(&options.version)?;

    let unused = canonical_unused(
        streams
            .iter()
            .flat_map(|(_, records)| records.iter().map(|r| r.path.as_str())),
        &dictionary,
    );

    let data_streams = streams
        .iter()
        .map(|(name, records)| {
            let entries = classify_records(records, &dictionary, options.reconcile);
            DataStreamReport {
                name: name.clone(),
                summary: ReconciliationSummary::from_entries(&entries),
                duplicates: duplicate_paths(records),
                entries,
            }
        })
        .collect();

    Ok(PackageReport {
        package,
        schema_version: dictionary.version().to_string(),
        data_streams,
        unused,
        warnings,
    })
}
