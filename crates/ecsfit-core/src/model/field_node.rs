//! Package field-definition trees
//!
//! Mirrors the YAML layout of `data_stream/<name>/fields/*.yml`: a document
//! is a sequence of nodes, a node with children is a group, a node without
//! children is a leaf.

use crate::model::scalar::{optional_text, seq_or_null};
use serde::{Deserialize, Serialize};

/// One node of a field-definition tree as authored in a file.
///
/// Only `name` is required. Boolean and numeric attributes are optional so
/// that an explicit `false`/`0` stays distinguishable from "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    /// Local (unqualified) name; may itself contain dots
    pub name: String,

    /// Data type; meaningless on groups, expected on leaves
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constant value (`constant_keyword` fields)
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,

    /// Indexing and mapping attributes relevant to leaves
    #[serde(flatten)]
    pub attributes: LeafAttributes,

    /// Children of a group node
    #[serde(
        default,
        deserialize_with = "seq_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields: Vec<FieldNode>,

    /// Alternate indexing representations of a leaf
    #[serde(
        default,
        deserialize_with = "seq_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub multi_fields: Vec<FieldNode>,
}

impl FieldNode {
    /// Create a leaf node with a type
    pub fn leaf(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type.into()),
            ..Default::default()
        }
    }

    /// Create a group node owning `children`
    pub fn group(name: impl Into<String>, children: Vec<FieldNode>) -> Self {
        Self {
            name: name.into(),
            field_type: Some("group".to_string()),
            fields: children,
            ..Default::default()
        }
    }

    /// Builder: attach a multi-field variant
    pub fn with_multi_field(mut self, variant: FieldNode) -> Self {
        self.multi_fields.push(variant);
        self
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A node with children is a group
    pub fn is_group(&self) -> bool {
        !self.fields.is_empty()
    }

    /// A node without children is a leaf
    pub fn is_leaf(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `dynamic` accepts a boolean or a mode string such as `strict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicMapping {
    Flag(bool),
    Mode(String),
}

/// Leaf-level indexing attributes.
///
/// Every attribute is optional: `None` means the key was absent from the
/// source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_values: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_analyzer: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub null_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_above: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_parent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_root: Option<bool>,
}

impl LeafAttributes {
    /// Fill every attribute left unset here from `parent`.
    pub fn inherit_from(&self, parent: &LeafAttributes) -> LeafAttributes {
        LeafAttributes {
            metric_type: self.metric_type.clone().or_else(|| parent.metric_type.clone()),
            unit: self.unit.clone().or_else(|| parent.unit.clone()),
            dimension: self.dimension.or(parent.dimension),
            pattern: self.pattern.clone().or_else(|| parent.pattern.clone()),
            external: self.external.clone().or_else(|| parent.external.clone()),
            doc_values: self.doc_values.or(parent.doc_values),
            index: self.index.or(parent.index),
            copy_to: self.copy_to.clone().or_else(|| parent.copy_to.clone()),
            enabled: self.enabled.or(parent.enabled),
            dynamic: self.dynamic.clone().or_else(|| parent.dynamic.clone()),
            scaling_factor: self.scaling_factor.or(parent.scaling_factor),
            analyzer: self.analyzer.clone().or_else(|| parent.analyzer.clone()),
            search_analyzer: self
                .search_analyzer
                .clone()
                .or_else(|| parent.search_analyzer.clone()),
            null_value: self.null_value.clone().or_else(|| parent.null_value.clone()),
            ignore_above: self.ignore_above.or(parent.ignore_above),
            object_type: self.object_type.clone().or_else(|| parent.object_type.clone()),
            path: self.path.clone().or_else(|| parent.path.clone()),
            normalizer: self.normalizer.clone().or_else(|| parent.normalizer.clone()),
            include_in_parent: self.include_in_parent.or(parent.include_in_parent),
            include_in_root: self.include_in_root.or(parent.include_in_root),
        }
    }
}

/// All nodes parsed from one field-definition document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTree {
    /// File the tree was read from, when it came from disk
    pub source: Option<String>,
    pub nodes: Vec<FieldNode>,
}

impl FieldTree {
    pub fn new(nodes: Vec<FieldNode>) -> Self {
        Self {
            source: None,
            nodes,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
