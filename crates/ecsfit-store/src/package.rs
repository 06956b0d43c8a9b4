//! Package layout: root sanity check, manifest info and data stream discovery

use crate::errors::{invalid_data_stream, invalid_package, manifest_read, package_io, Result};
use ecsfit_core::model::scalar::optional_text;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

/// Package manifest file at the package root
pub const MANIFEST_FILE: &str = "manifest.yml";

/// Directory holding one subdirectory per data stream
pub const DATA_STREAM_DIR: &str = "data_stream";

/// Identification read from the package manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// Check that `root` looks like a package before anything is read.
///
/// # Errors
///
/// `InvalidPackage` when the root is not a directory or has no
/// `data_stream/` directory.
pub fn ensure_package_root(root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(invalid_package(root, "package path is not a directory"));
    }
    if !root.join(DATA_STREAM_DIR).is_dir() {
        return Err(invalid_package(
            root,
            format!("package has no {} directory", DATA_STREAM_DIR),
        ));
    }
    Ok(())
}

/// Read `manifest.yml`.
///
/// # Errors
///
/// `ManifestRead` when the manifest is missing or malformed. Callers treat
/// this as a warning.
pub fn read_package_info(root: &Path) -> Result<PackageInfo> {
    let path = root.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|e| manifest_read(&path, e))?;
    serde_yaml::from_str(&content).map_err(|e| manifest_read(&path, e))
}

/// Check that a data stream name is a single plain directory name.
///
/// # Errors
///
/// `InvalidInput` for empty names, separators, `.`/`..` or absolute paths.
pub fn validate_data_stream_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || name.contains('/') || name.contains('\\') {
        return Err(invalid_data_stream(name));
    }
    Ok(())
}

/// Names of every data stream under the package, sorted.
///
/// # Errors
///
/// `InvalidPackage` when there is no `data_stream/` directory or it cannot
/// be listed.
pub fn list_data_streams(root: &Path) -> Result<Vec<String>> {
    let dir = root.join(DATA_STREAM_DIR);
    if !dir.is_dir() {
        return Err(invalid_package(
            root,
            format!("package has no {} directory", DATA_STREAM_DIR),
        ));
    }

    let mut names: Vec<String> = fs::read_dir(&dir)
        .map_err(|e| package_io("list_data_streams", &dir, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    Ok(names)
}
