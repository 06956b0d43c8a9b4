//! Report rendering: aligned text tables or JSON

use ecsfit_core::ReconciliationEntry;
use ecsfit_engine::PackageReport;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// List `canonical-unused` paths (totals always count them)
    pub show_unused: bool,
}

const HEADERS: [&str; 4] = ["PATH", "CLASSIFICATION", "PACKAGE TYPE", "CANONICAL TYPE"];

fn row(entry: &ReconciliationEntry) -> [String; 4] {
    [
        entry.path.clone(),
        entry.classification.to_string(),
        entry.package_type.clone().unwrap_or_else(|| "-".to_string()),
        entry.canonical_type.clone().unwrap_or_else(|| "-".to_string()),
    ]
}

fn write_table(out: &mut String, rows: &[[String; 4]]) {
    let mut widths = HEADERS.map(str::len);
    for r in rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut write_line = |cells: [&str; 4]| {
        let line = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    };

    write_line(HEADERS);
    for r in rows {
        write_line([r[0].as_str(), r[1].as_str(), r[2].as_str(), r[3].as_str()]);
    }
}

/// Human-readable report
pub fn render_table(report: &PackageReport, options: &RenderOptions) -> String {
    let mut out = String::new();

    if let Some(package) = &report.package {
        let _ = writeln!(
            out,
            "Package: {} {}",
            package.name,
            package.version.as_deref().unwrap_or("")
        );
    }
    let _ = writeln!(out, "Schema version: {}", report.schema_version);

    for ds in &report.data_streams {
        let _ = writeln!(out);
        let _ = writeln!(out, "Data stream: {}", ds.name);

        let rows: Vec<[String; 4]> = ds.entries.iter().map(row).collect();
        if rows.is_empty() {
            let _ = writeln!(out, "(no fields)");
        } else {
            write_table(&mut out, &rows);
        }

        let s = &ds.summary;
        let _ = writeln!(
            out,
            "Summary: {} matched, {} extension, {} conflict",
            s.matched, s.extension, s.conflict
        );
        if !ds.duplicates.is_empty() {
            let dups = ds
                .duplicates
                .iter()
                .map(|(path, count)| format!("{} (x{})", path, count))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "Duplicates: {}", dups);
        }
    }

    if options.show_unused && !report.unused.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Canonical fields unused by the package:");
        let rows: Vec<[String; 4]> = report.unused.iter().map(row).collect();
        write_table(&mut out, &rows);
    }

    let t = report.totals();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total: {} matched, {} extension, {} conflict, {} canonical-unused",
        t.matched, t.extension, t.conflict, t.canonical_unused
    );

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for w in &report.warnings {
            let _ = writeln!(out, "  [{}] {}", w.code, w.message);
        }
    }
    out
}

/// Machine-readable report with package-wide `totals`
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn render_json(
    report: &PackageReport,
    options: &RenderOptions,
) -> Result<String, serde_json::Error> {
    let totals = report.totals();
    let mut report = report.clone();
    if !options.show_unused {
        report.unused.clear();
    }

    let mut value = serde_json::to_value(&report)?;
    if let serde_json::Value::Object(map) = &mut value {
        map.insert("totals".to_string(), serde_json::to_value(totals)?);
    }
    let mut json = serde_json::to_string_pretty(&value)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecsfit_core::{Classification, ReconciliationSummary};
    use ecsfit_engine::DataStreamReport;

    fn entry(path: &str, classification: Classification) -> ReconciliationEntry {
        ReconciliationEntry {
            path: path.to_string(),
            classification,
            package_type: Some("keyword".to_string()),
            canonical_type: None,
            source: None,
        }
    }

    fn report() -> PackageReport {
        let entries = vec![entry("custom.id", Classification::Extension)];
        PackageReport {
            package: None,
            schema_version: "main".to_string(),
            data_streams: vec![DataStreamReport {
                name: "logs".to_string(),
                summary: ReconciliationSummary::from_entries(&entries),
                duplicates: Default::default(),
                entries,
            }],
            unused: vec![entry("host.name", Classification::CanonicalUnused)],
            warnings: vec![],
        }
    }

    #[test]
    fn test_table_hides_unused_by_default() {
        let text = render_table(&report(), &RenderOptions::default());

        assert!(text.contains("custom.id"));
        assert!(!text.contains("host.name"));
        assert!(text.contains("1 canonical-unused"));
    }

    #[test]
    fn test_table_shows_unused_on_request() {
        let text = render_table(&report(), &RenderOptions { show_unused: true });
        assert!(text.contains("Canonical fields unused by the package:"));
        assert!(text.contains("host.name"));
    }

    #[test]
    fn test_json_hides_unused_but_keeps_totals() {
        let json = render_json(&report(), &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["unused"].as_array().unwrap().len(), 0);
        assert_eq!(value["totals"]["canonical_unused"], 1);
        assert_eq!(value["totals"]["extension"], 1);
    }

    #[test]
    fn test_columns_align() {
        let text = render_table(&report(), &RenderOptions::default());
        let header = text.lines().find(|l| l.starts_with("PATH")).unwrap();
        let row = text.lines().find(|l| l.starts_with("custom.id")).unwrap();
        assert_eq!(header.find("CLASSIFICATION"), row.find("extension"));
    }
}
