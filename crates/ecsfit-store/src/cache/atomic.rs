//! Atomic write primitives
//!
//! Uses temp→rename so a concurrent reader sees either no artifact or a
//! complete one.

use crate::errors::{cache_io, Result};
use std::io::Write;
use std::path::Path;

/// Atomically write bytes to a file, creating parent directories.
///
/// Every call stages into its own uniquely named temp file in the target
/// directory, so concurrent writers of the same target never share one;
/// the last rename wins.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = match target_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| cache_io("create_cache_dir", parent, e))?;

    let file_name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = format!(".{}.", file_name);
    let mut staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| cache_io("create_cache_temp", parent, e))?;

    staged
        .write_all(content)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| cache_io("write_cache_temp", staged.path(), e))?;

    // Dropping the PersistError's handle removes the temp file
    staged
        .persist(target_path)
        .map_err(|e| cache_io("rename_cache_temp", target_path, e.error))?;

    Ok(())
}
