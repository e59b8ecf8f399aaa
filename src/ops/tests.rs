// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::fixtures::{chain, nid, node, sample_tree};
use crate::model::{MenuOption, NodeRepository, NodeType};

use super::{
    add_child, add_child_with_id, delete_subtree, insert_before, insert_before_with_id,
    strip_option_targets, update_node, validate_tree, InvalidOperationReason, TreeError,
    TreeViolation,
};

#[fixture]
fn tree() -> NodeRepository {
    sample_tree()
}

fn assert_valid(nodes: &NodeRepository) {
    let violations = validate_tree(nodes);
    assert!(violations.is_empty(), "tree invariants broken: {violations:?}");
}

#[rstest]
fn add_child_appends_last_sibling(tree: NodeRepository) {
    let before = tree.children(&nid("menu")).len();
    let inserted = add_child(&tree, &nid("menu")).expect("add child");

    assert_eq!(inserted.node.order, before as i64);
    assert_eq!(inserted.node.node_type, NodeType::Question);
    assert!(inserted.node.options.is_empty());
    assert_eq!(inserted.node.parent_id, Some(nid("menu")));

    let children = inserted.nodes.children(&nid("menu"));
    assert_eq!(children.len(), before + 1);
    assert_eq!(children.last().map(|n| &n.id), Some(&inserted.node.id));
    assert_valid(&inserted.nodes);
}

#[rstest]
fn add_child_leaves_existing_nodes_untouched(tree: NodeRepository) {
    let inserted = add_child_with_id(&tree, &nid("support"), nid("new")).expect("add child");
    for original in tree.iter() {
        assert_eq!(inserted.nodes.find(&original.id), Some(original));
    }
    assert_eq!(inserted.nodes.len(), tree.len() + 1);
}

#[rstest]
fn add_child_to_leaf_starts_at_order_zero(tree: NodeRepository) {
    let inserted = add_child(&tree, &nid("goodbye")).expect("add child");
    assert_eq!(inserted.node.order, 0);
}

#[rstest]
fn add_child_rejects_missing_parent(tree: NodeRepository) {
    let err = add_child(&tree, &nid("nope")).unwrap_err();
    assert_eq!(err, TreeError::NotFound { node_id: nid("nope") });
}

#[rstest]
fn insert_before_moves_three_facts_together(tree: NodeRepository) {
    let inserted = insert_before_with_id(&tree, &nid("support"), nid("triage")).expect("insert");
    let nodes = &inserted.nodes;

    assert_eq!(nodes.len(), tree.len() + 1);

    let triage = nodes.find(&nid("triage")).expect("new node");
    assert_eq!(triage.parent_id, Some(nid("menu")));
    assert_eq!(triage.order, 1);
    assert!(triage.has_options);
    assert_eq!(
        triage.options,
        vec![MenuOption::new("1", "Support", Some(nid("support")))]
    );

    let support = nodes.find(&nid("support")).expect("target");
    assert_eq!(support.parent_id, Some(nid("triage")));

    let menu = nodes.find(&nid("menu")).expect("former parent");
    let targets = menu
        .options
        .iter()
        .map(|o| o.target_node_id.as_ref().map(|id| id.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(targets, vec![Some("sales"), Some("triage")]);

    // The target's own subtree comes along.
    assert_eq!(
        nodes.find(&nid("support-hours")).unwrap().parent_id,
        Some(nid("support"))
    );
    assert_valid(nodes);
}

#[rstest]
fn insert_before_redirects_every_matching_option(tree: NodeRepository) {
    let mut menu = tree.find(&nid("menu")).unwrap().clone();
    menu.options
        .push(MenuOption::new("9", "Support again", Some(nid("support"))));
    let tree = update_node(&tree, menu).expect("update");

    let inserted = insert_before(&tree, &nid("support")).expect("insert");
    let menu = inserted.nodes.find(&nid("menu")).unwrap();
    let redirected = menu
        .options
        .iter()
        .filter(|o| o.targets(&inserted.node.id))
        .count();
    assert_eq!(redirected, 2);
    assert!(!menu.options.iter().any(|o| o.targets(&nid("support"))));
}

#[rstest]
fn insert_before_leaves_input_snapshot_alone(tree: NodeRepository) {
    let snapshot = tree.clone();
    let _ = insert_before(&tree, &nid("sales")).expect("insert");
    assert_eq!(tree, snapshot);
}

#[rstest]
fn insert_before_moves_only_the_first_duplicate(tree: NodeRepository) {
    let mut shadow = node("sales", Some("goodbye"), 4);
    shadow.title = "Shadow".to_owned();
    let mut nodes = tree.into_nodes();
    nodes.push(shadow.clone());
    let tree = NodeRepository::from(nodes);

    let inserted = insert_before_with_id(&tree, &nid("sales"), nid("desk")).expect("insert");
    let entries = inserted
        .nodes
        .iter()
        .filter(|n| n.id == nid("sales"))
        .collect::<Vec<_>>();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].parent_id, Some(nid("desk")));
    assert_eq!(*entries[1], shadow);
}

#[rstest]
#[case("root", TreeError::InvalidOperation { node_id: nid("root"), reason: InvalidOperationReason::InsertBeforeRoot })]
#[case("ghost", TreeError::NotFound { node_id: nid("ghost") })]
fn insert_before_rejects(tree: NodeRepository, #[case] target: &str, #[case] expected: TreeError) {
    assert_eq!(insert_before(&tree, &nid(target)).unwrap_err(), expected);
}

#[rstest]
fn delete_subtree_removes_node_and_descendants(tree: NodeRepository) {
    let removed = delete_subtree(&tree, &nid("support")).expect("delete");

    assert_eq!(removed.removed, vec![nid("support-hours"), nid("support")]);
    assert_eq!(removed.former_parent_id, Some(nid("menu")));
    assert!(removed.nodes.find(&nid("support")).is_none());
    assert!(removed.nodes.find(&nid("support-hours")).is_none());

    for original in tree.iter() {
        if removed.removed.contains(&original.id) {
            continue;
        }
        assert_eq!(removed.nodes.find(&original.id), Some(original));
    }
    assert_valid(&removed.nodes);
}

#[rstest]
fn delete_subtree_keeps_dangling_parent_option(tree: NodeRepository) {
    // Cleaning the former parent's options is the caller's follow-up step.
    let removed = delete_subtree(&tree, &nid("sales")).expect("delete");
    let menu = removed.nodes.find(&nid("menu")).unwrap();
    assert!(menu.options.iter().any(|o| o.targets(&nid("sales"))));

    let cleaned = strip_option_targets(&removed.nodes, &nid("menu"), &nid("sales"));
    let menu = cleaned.find(&nid("menu")).unwrap();
    assert_eq!(menu.options.len(), 1);
    assert!(menu.options[0].targets(&nid("support")));
}

#[rstest]
#[case("root", InvalidOperationReason::DeleteRoot)]
#[case("ghost", InvalidOperationReason::DeleteMissing)]
fn delete_subtree_rejects(
    tree: NodeRepository,
    #[case] target: &str,
    #[case] reason: InvalidOperationReason,
) {
    let err = delete_subtree(&tree, &nid(target)).unwrap_err();
    assert_eq!(
        err,
        TreeError::InvalidOperation {
            node_id: nid(target),
            reason
        }
    );
}

#[rstest]
fn delete_subtree_terminates_on_cyclic_input() {
    let nodes = NodeRepository::replace(vec![
        node("root", None, 0),
        node("a", Some("root"), 0),
        node("b", Some("a"), 0),
        node("c", Some("b"), 0),
        // `a` also claims `c` as parent through a duplicate entry.
        node("a", Some("c"), 0),
    ]);
    let removed = delete_subtree(&nodes, &nid("a")).expect("delete");
    assert_eq!(removed.nodes.len(), 1);
    assert_eq!(removed.removed.last(), Some(&nid("a")));
}

#[rstest]
fn delete_subtree_handles_very_deep_chains() {
    let nodes = chain(100_000);
    let removed = delete_subtree(&nodes, &nid("n1")).expect("delete");
    assert_eq!(removed.removed.len(), 99_999);
    assert_eq!(removed.removed.last(), Some(&nid("n1")));
    assert_eq!(removed.nodes.len(), 1);
    assert_valid(&removed.nodes);
    assert_valid(&nodes);
}

#[rstest]
fn update_node_replaces_fields_but_not_shape(tree: NodeRepository) {
    let mut sales = tree.find(&nid("sales")).unwrap().clone();
    sales.title = "Sales team".to_owned();
    sales.forward_retrieve_after_seconds = Some(30);
    sales.parent_id = Some(nid("root"));

    let updated = update_node(&tree, sales).expect("update");
    let sales = updated.find(&nid("sales")).unwrap();
    assert_eq!(sales.title, "Sales team");
    assert_eq!(sales.forward_retrieve_after_seconds, Some(30));
    assert_eq!(sales.parent_id, Some(nid("menu")));

    let positions = |repo: &NodeRepository| repo.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
    assert_eq!(positions(&updated), positions(&tree));
    for original in tree.iter().filter(|n| n.id != nid("sales")) {
        assert_eq!(updated.find(&original.id), Some(original));
    }
}

#[rstest]
fn update_node_rejects_unknown_id(tree: NodeRepository) {
    let err = update_node(&tree, node("ghost", Some("root"), 0)).unwrap_err();
    assert_eq!(err, TreeError::NotFound { node_id: nid("ghost") });
}

#[rstest]
fn mixed_edit_sequence_keeps_single_root(tree: NodeRepository) {
    let mut nodes = tree;
    for _ in 0..3 {
        nodes = add_child(&nodes, &nid("support")).expect("add").nodes;
    }
    nodes = insert_before(&nodes, &nid("menu")).expect("insert").nodes;
    nodes = delete_subtree(&nodes, &nid("support-hours")).expect("delete").nodes;
    nodes = insert_before(&nodes, &nid("support")).expect("insert").nodes;

    assert_valid(&nodes);
    assert_eq!(nodes.iter().filter(|n| n.is_root()).count(), 1);
    assert_eq!(nodes.len(), 6 + 3 + 2 - 1);
}

#[rstest]
fn validate_tree_reports_broken_structures() {
    let nodes = NodeRepository::replace(vec![
        node("r1", None, 0),
        node("r2", None, 0),
        node("orphan", Some("missing"), 0),
        node("x", Some("y"), 0),
        node("y", Some("x"), 0),
        node("r1", Some("r2"), 0),
    ]);
    let violations = validate_tree(&nodes);

    assert!(violations.contains(&TreeViolation::MultipleRoots {
        roots: vec![nid("r1"), nid("r2")]
    }));
    assert!(violations.contains(&TreeViolation::DuplicateId { node_id: nid("r1") }));
    assert!(violations.contains(&TreeViolation::DanglingParent {
        node_id: nid("orphan"),
        parent_id: nid("missing"),
    }));
    assert!(violations.contains(&TreeViolation::Cycle { node_id: nid("x") }));
    assert!(violations.contains(&TreeViolation::Cycle { node_id: nid("y") }));
}

#[rstest]
fn validate_tree_tolerates_dangling_option_targets(tree: NodeRepository) {
    // Current behavior, not a contract: options may point at nodes that do not exist.
    let mut menu = tree.find(&nid("menu")).unwrap().clone();
    menu.options
        .push(MenuOption::new("3", "Gone", Some(nid("deleted-long-ago"))));
    let nodes = update_node(&tree, menu).expect("update");
    assert!(validate_tree(&nodes).is_empty());
}

#[rstest]
fn validate_tree_flags_empty_collection() {
    assert_eq!(
        validate_tree(&NodeRepository::default()),
        vec![TreeViolation::NoRoot]
    );
}
