//! Reads `data_stream/<name>/fields/*.yml` into nested field trees
//!
//! Reading is best-effort: every document that parses becomes a tree, every
//! document that does not becomes an error in the returned set.

use crate::errors::{data_stream_not_found, field_file_parse, package_io, Result};
use crate::package::{validate_data_stream_name, DATA_STREAM_DIR};
use ecsfit_core::core_types::schema::EVENT_SKIPPED;
use ecsfit_core::errors::ExError;
use ecsfit_core::model::{FieldNode, FieldTree};
use ecsfit_core::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Directory holding field documents inside a data stream
pub const FIELDS_DIR: &str = "fields";

/// Base names (without extension) of documents that are never user-authored
/// fields: agent/base boilerplate and raw dumps of the canonical schema.
pub const EXCLUDED_FIELD_FILES: &[&str] = &["agent", "base-fields", "ecs"];

/// Extensions recognized as field-definition documents
pub const FIELD_FILE_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Trees read from one data stream plus the per-file failures
#[derive(Debug, Clone, Default)]
pub struct FieldTreeSet {
    pub trees: Vec<FieldTree>,
    pub errors: Vec<ExError>,
}

impl FieldTreeSet {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// `<root>/data_stream/<name>/fields`
pub fn fields_dir(package_root: &Path, data_stream: &str) -> PathBuf {
    package_root
        .join(DATA_STREAM_DIR)
        .join(data_stream)
        .join(FIELDS_DIR)
}

/// Whether a file name is on the boilerplate exclusion list
pub fn is_excluded(file_name: &str) -> bool {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    EXCLUDED_FIELD_FILES.contains(&stem)
}

fn has_field_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FIELD_FILE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Read every field document of a data stream.
///
/// Documents are visited in file-name order so repeated runs produce the
/// same tree order.
///
/// # Errors
///
/// - `InvalidInput` when `data_stream` is not a single directory name
/// - `DataStreamNotFound` when the fields directory is absent
/// - `InvalidPackage` when the directory exists but cannot be listed
///
/// Malformed documents are not errors here; they land in
/// [`FieldTreeSet::errors`].
pub fn read_data_stream(package_root: &Path, data_stream: &str) -> Result<FieldTreeSet> {
    let started = Instant::now();
    log_op_start!("read_fields", data_stream = data_stream);

    let result = read_data_stream_inner(package_root, data_stream);
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(set) => log_op_end!(
            "read_fields",
            duration_ms = duration_ms,
            data_stream = data_stream,
            tree_count = set.trees.len()
        ),
        Err(err) => log_op_error!(
            "read_fields",
            err.clone(),
            duration_ms = duration_ms,
            data_stream = data_stream
        ),
    }
    result
}

fn read_data_stream_inner(package_root: &Path, data_stream: &str) -> Result<FieldTreeSet> {
    validate_data_stream_name(data_stream)?;
    let dir = fields_dir(package_root, data_stream);
    if !dir.is_dir() {
        return Err(data_stream_not_found(data_stream, &dir));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .map_err(|e| package_io("list_fields", &dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_field_extension(path))
        .collect();
    files.sort();

    let mut set = FieldTreeSet::default();
    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if is_excluded(&file_name) {
            tracing::info!(
                op = "read_fields",
                event = EVENT_SKIPPED,
                data_stream = data_stream,
                file = file_name.as_str(),
                "Skipping boilerplate field file"
            );
            continue;
        }

        match read_field_file(&path) {
            Ok(tree) => set.trees.push(tree),
            Err(err) => {
                tracing::warn!(
                    op = "read_fields",
                    data_stream = data_stream,
                    file = file_name.as_str(),
                    err_code = err.code(),
                    "{}",
                    err
                );
                set.errors.push(err);
            }
        }
    }
    Ok(set)
}

/// Parse one field document into a tree.
///
/// An empty (or comments-only) document yields an empty tree. The tree's
/// source is the file name.
///
/// # Errors
///
/// `FieldFileParse` when the file cannot be read or is not a list of
/// field nodes.
pub fn read_field_file(path: &Path) -> Result<FieldTree> {
    let content = fs::read_to_string(path).map_err(|e| field_file_parse(path, e))?;
    let nodes: Option<Vec<FieldNode>> =
        serde_yaml::from_str(&content).map_err(|e| field_file_parse(path, e))?;

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FieldTree::new(nodes.unwrap_or_default()).with_source(source))
}
