//! Flattening of nested field trees into dotted-path records
//!
//! Depth-first, preorder. The ancestor path is passed down as an immutable
//! prefix; nodes are never mutated. Trees are flattened independently and
//! concatenated, so a path defined by two files yields two records.

use crate::model::{FieldNode, FieldOrigin, FieldTree, FlatFieldRecord};
use std::collections::BTreeMap;

/// Flatten every tree, preserving tree order and duplicate paths.
pub fn flatten(trees: &[FieldTree]) -> Vec<FlatFieldRecord> {
    trees.iter().flat_map(flatten_tree).collect()
}

/// Flatten the nodes of a single document.
pub fn flatten_tree(tree: &FieldTree) -> Vec<FlatFieldRecord> {
    let mut out = Vec::new();
    for node in &tree.nodes {
        flatten_node(node, "", tree.source.as_deref(), &mut out);
    }
    out
}

/// Paths defined more than once, with their occurrence counts.
pub fn duplicate_paths(records: &[FlatFieldRecord]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.path.clone()).or_default() += 1;
    }
    counts.retain(|_, count| *count > 1);
    counts
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn flatten_node(
    node: &FieldNode,
    prefix: &str,
    source: Option<&str>,
    out: &mut Vec<FlatFieldRecord>,
) {
    let path = join_path(prefix, &node.name);

    if node.is_group() {
        for child in &node.fields {
            flatten_node(child, &path, source, out);
        }
        return;
    }

    out.push(FlatFieldRecord {
        path: path.clone(),
        field_type: node.field_type.clone().unwrap_or_default(),
        description: node.description.clone(),
        value: node.value.clone(),
        attributes: node.attributes.clone(),
        origin: FieldOrigin::Leaf,
        source: source.map(str::to_string),
    });

    for variant in &node.multi_fields {
        out.push(FlatFieldRecord {
            path: join_path(&path, &variant.name),
            field_type: variant.field_type.clone().unwrap_or_default(),
            description: node.description.clone(),
            value: node.value.clone(),
            attributes: variant.attributes.inherit_from(&node.attributes),
            origin: FieldOrigin::MultiField {
                parent: path.clone(),
            },
            source: source.map(str::to_string),
        });
    }
}
