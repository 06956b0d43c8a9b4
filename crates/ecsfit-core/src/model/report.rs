//! Reconciliation report rows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing one path against the canonical dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Path exists canonically with a compatible type
    Matched,
    /// Path is unknown to the dictionary: a custom addition
    Extension,
    /// Path exists canonically with an incompatible type
    Conflict,
    /// Canonical path never referenced by the package
    CanonicalUnused,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Matched => "matched",
            Classification::Extension => "extension",
            Classification::Conflict => "conflict",
            Classification::CanonicalUnused => "canonical-unused",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the reconciliation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationEntry {
    pub path: String,
    pub classification: Classification,
    pub package_type: Option<String>,
    pub canonical_type: Option<String>,
    /// File that defined the package-side field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Row counts per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub matched: usize,
    pub extension: usize,
    pub conflict: usize,
    pub canonical_unused: usize,
}

impl ReconciliationSummary {
    pub fn from_entries(entries: &[ReconciliationEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            summary.add(entry.classification);
        }
        summary
    }

    pub fn add(&mut self, classification: Classification) {
        match classification {
            Classification::Matched => self.matched += 1,
            Classification::Extension => self.extension += 1,
            Classification::Conflict => self.conflict += 1,
            Classification::CanonicalUnused => self.canonical_unused += 1,
        }
    }

    /// Sum two summaries (used to total data streams)
    pub fn merge(&mut self, other: &ReconciliationSummary) {
        self.matched += other.matched;
        self.extension += other.extension;
        self.conflict += other.conflict;
        self.canonical_unused += other.canonical_unused;
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflict > 0
    }
}
