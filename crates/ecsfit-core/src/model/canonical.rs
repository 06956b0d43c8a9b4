//! Canonical field dictionary downloaded from the schema source

use crate::model::scalar::{optional_text, seq_or_null};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the canonical dictionary.
///
/// Unknown keys in the artifact are ignored; missing keys take their
/// defaults (`required` defaults to `false`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalFieldRecord {
    #[serde(default)]
    pub dashed_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<String>,
    #[serde(default)]
    pub flat_name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub name: String,
    /// Ordered normalization directives (e.g. `array`, `lowercase`)
    #[serde(default, deserialize_with = "seq_or_null")]
    pub normalize: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub short: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
}

impl CanonicalFieldRecord {
    /// Record with a path and type, other attributes derived or empty
    pub fn new(flat_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let flat_name = flat_name.into();
        let name = flat_name
            .rsplit('.')
            .next()
            .unwrap_or(flat_name.as_str())
            .to_string();
        Self {
            dashed_name: flat_name.replace('.', "-"),
            name,
            flat_name,
            field_type: field_type.into(),
            ..Default::default()
        }
    }
}

/// Mapping from dotted path to canonical record for one schema version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDictionary {
    version: String,
    fields: BTreeMap<String, CanonicalFieldRecord>,
}

impl SchemaDictionary {
    pub fn new(version: impl Into<String>, fields: BTreeMap<String, CanonicalFieldRecord>) -> Self {
        Self {
            version: version.into(),
            fields,
        }
    }

    /// Build a dictionary keyed by each record's `flat_name`
    pub fn from_records(
        version: impl Into<String>,
        records: impl IntoIterator<Item = CanonicalFieldRecord>,
    ) -> Self {
        let fields = records
            .into_iter()
            .map(|r| (r.flat_name.clone(), r))
            .collect();
        Self::new(version, fields)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn get(&self, path: &str) -> Option<&CanonicalFieldRecord> {
        self.fields.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries in ascending path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalFieldRecord)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
