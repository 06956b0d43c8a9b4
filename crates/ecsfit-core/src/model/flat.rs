//! Flattened leaf records addressed by dotted path

use crate::model::field_node::LeafAttributes;
use serde::{Deserialize, Serialize};

/// How a flat record came into existence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldOrigin {
    /// A leaf node of the tree
    Leaf,
    /// A multi-field variant of the leaf at `parent`
    MultiField { parent: String },
}

/// The flattened projection of one leaf (or one multi-field variant).
///
/// Paths are not unique across a flattening pass: the same path may be
/// defined by several files, and every definition is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatFieldRecord {
    /// Dotted path: ancestor names and the leaf name joined with `.`
    pub path: String,
    /// Declared type, empty when the source node carried none
    pub field_type: String,
    pub description: Option<String>,
    pub value: Option<String>,
    pub attributes: LeafAttributes,
    pub origin: FieldOrigin,
    /// File the defining tree was read from
    pub source: Option<String>,
}

impl FlatFieldRecord {
    /// Minimal record, mostly useful for building fixtures
    pub fn new(path: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field_type: field_type.into(),
            description: None,
            value: None,
            attributes: LeafAttributes::default(),
            origin: FieldOrigin::Leaf,
            source: None,
        }
    }

    /// The declared type, or `None` when the source node had no type
    pub fn declared_type(&self) -> Option<&str> {
        if self.field_type.is_empty() {
            None
        } else {
            Some(&self.field_type)
        }
    }

    pub fn is_multi_field(&self) -> bool {
        matches!(self.origin, FieldOrigin::MultiField { .. })
    }
}
