//! Flattening properties: path construction, multi-field expansion,
//! duplicate preservation.

use ecsfit_core::model::{FieldNode, FieldOrigin, FieldTree};
use ecsfit_core::{duplicate_paths, flatten, flatten_tree};
use proptest::prelude::*;

fn parse_tree(yaml: &str) -> FieldTree {
    FieldTree::new(serde_yaml::from_str(yaml).unwrap())
}

#[test]
fn test_flat_tree_yields_one_record_per_node() {
    let tree = FieldTree::new(vec![
        FieldNode::leaf("message", "match_only_text"),
        FieldNode::leaf("tags", "keyword"),
        FieldNode::leaf("@timestamp", "date"),
    ]);

    let records = flatten_tree(&tree);

    let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["message", "tags", "@timestamp"]);
}

#[test]
fn test_nested_groups_build_dotted_path() {
    let tree = FieldTree::new(vec![FieldNode::group(
        "a",
        vec![FieldNode::group("b", vec![FieldNode::leaf("c", "long")])],
    )]);

    let records = flatten_tree(&tree);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "a.b.c");
    assert_eq!(records[0].field_type, "long");
}

#[test]
fn test_multi_field_expansion() {
    let tree = FieldTree::new(vec![FieldNode::leaf("a", "text")
        .with_description("Free text")
        .with_multi_field(FieldNode::leaf("raw", "keyword"))]);

    let records = flatten_tree(&tree);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].path, "a");
    assert_eq!(records[0].field_type, "text");
    assert_eq!(records[1].path, "a.raw");
    assert_eq!(records[1].field_type, "keyword");
    assert_eq!(records[1].description.as_deref(), Some("Free text"));
    assert_eq!(
        records[1].origin,
        FieldOrigin::MultiField {
            parent: "a".to_string()
        }
    );
}

#[test]
fn test_multi_field_inside_group_keeps_prefix() {
    let tree = parse_tree(
        r#"
- name: user_agent
  type: group
  fields:
    - name: original
      type: keyword
      ignore_above: 1024
      multi_fields:
        - name: text
          type: match_only_text
"#,
    );

    let records = flatten_tree(&tree);

    assert_eq!(records[1].path, "user_agent.original.text");
    // Variant inherits indexing attributes it leaves unset
    assert_eq!(records[1].attributes.ignore_above, Some(1024));
}

#[test]
fn test_duplicate_paths_across_trees_are_preserved() {
    let first = FieldTree::new(vec![FieldNode::group(
        "a",
        vec![FieldNode::leaf("b", "keyword")],
    )])
    .with_source("fields.yml");
    let second = FieldTree::new(vec![FieldNode::leaf("a.b", "long")]).with_source("extra.yml");

    let records = flatten(&[first, second]);

    let at_ab: Vec<_> = records.iter().filter(|r| r.path == "a.b").collect();
    assert_eq!(at_ab.len(), 2);
    assert_eq!(at_ab[0].source.as_deref(), Some("fields.yml"));
    assert_eq!(at_ab[1].source.as_deref(), Some("extra.yml"));

    let dups = duplicate_paths(&records);
    assert_eq!(dups.get("a.b"), Some(&2));
}

#[test]
fn test_explicit_false_survives_flattening() {
    let tree = parse_tree(
        r#"
- name: payload
  type: keyword
  index: false
  doc_values: false
- name: other
  type: keyword
"#,
    );

    let records = flatten_tree(&tree);

    assert_eq!(records[0].attributes.index, Some(false));
    assert_eq!(records[0].attributes.doc_values, Some(false));
    assert_eq!(records[1].attributes.index, None);
}

#[test]
fn test_flatten_does_not_mutate_input() {
    let tree = FieldTree::new(vec![FieldNode::group(
        "a",
        vec![FieldNode::leaf("b", "keyword")],
    )]);
    let before = tree.clone();

    let _ = flatten_tree(&tree);
    let _ = flatten_tree(&tree);

    assert_eq!(tree, before);
}

fn arb_leaf_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn arb_node() -> impl Strategy<Value = FieldNode> {
    let leaf = (arb_leaf_name(), prop::bool::ANY).prop_map(|(name, with_variant)| {
        let node = FieldNode::leaf(name, "keyword");
        if with_variant {
            node.with_multi_field(FieldNode::leaf("text", "match_only_text"))
        } else {
            node
        }
    });
    leaf.prop_recursive(4, 32, 4, |inner| {
        (arb_leaf_name(), prop::collection::vec(inner, 1..4))
            .prop_map(|(name, children)| FieldNode::group(name, children))
    })
}

fn expected_count(node: &FieldNode) -> usize {
    if node.is_group() {
        node.fields.iter().map(expected_count).sum()
    } else {
        1 + node.multi_fields.len()
    }
}

proptest! {
    #[test]
    fn prop_one_record_per_leaf_and_variant(nodes in prop::collection::vec(arb_node(), 0..5)) {
        let expected: usize = nodes.iter().map(expected_count).sum();
        let records = flatten_tree(&FieldTree::new(nodes));
        prop_assert_eq!(records.len(), expected);
    }

    #[test]
    fn prop_paths_start_with_a_top_level_name(nodes in prop::collection::vec(arb_node(), 1..5)) {
        let roots: Vec<String> = nodes.iter().map(|n| n.name.clone()).collect();
        let records = flatten_tree(&FieldTree::new(nodes));
        for record in records {
            let head = record.path.split('.').next().unwrap_or_default().to_string();
            prop_assert!(roots.contains(&head));
        }
    }
}
