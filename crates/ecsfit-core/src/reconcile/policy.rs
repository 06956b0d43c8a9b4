//! Type comparison policy

use serde::{Deserialize, Serialize};

/// How package and canonical types are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypePolicy {
    /// Types must be textually identical
    #[default]
    Strict,
    /// Types of the same family are interchangeable
    /// (`keyword`/`constant_keyword`/`wildcard`, `text`/`match_only_text`)
    Family,
}

const KEYWORD_FAMILY: &[&str] = &["keyword", "constant_keyword", "wildcard"];
const TEXT_FAMILY: &[&str] = &["text", "match_only_text"];

fn family_of(field_type: &str) -> Option<&'static str> {
    if KEYWORD_FAMILY.contains(&field_type) {
        Some("keyword")
    } else if TEXT_FAMILY.contains(&field_type) {
        Some("text")
    } else {
        None
    }
}

impl TypePolicy {
    /// Whether a package-side type is compatible with the canonical type.
    ///
    /// A missing package type is never compatible.
    pub fn is_compatible(&self, package_type: Option<&str>, canonical_type: &str) -> bool {
        let Some(package_type) = package_type else {
            return false;
        };
        if package_type == canonical_type {
            return true;
        }
        match self {
            TypePolicy::Strict => false,
            TypePolicy::Family => match (family_of(package_type), family_of(canonical_type)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub type_policy: TypePolicy,
}
