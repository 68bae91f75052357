//! Tests for the expand/collapse state machine.

use rstest::{fixture, rstest};

use tmtree::domain::{NodeId, PlainNaming, Rect, TmTree};
use tmtree::util::testing::{self, fixed_tree};

/// root
/// ├── left
/// │   ├── inner
/// │   │   ├── x (1)
/// │   │   └── y (1)
/// │   └── z (2)
/// └── right (4)
struct Nested {
    tree: TmTree<PlainNaming>,
    root: NodeId,
    left: NodeId,
    inner: NodeId,
    x: NodeId,
    z: NodeId,
    right: NodeId,
}

#[fixture]
fn nested() -> Nested {
    testing::init_test_setup();
    let mut tree = fixed_tree(PlainNaming);
    let x = tree.new_node("x", vec![], 1);
    let y = tree.new_node("y", vec![], 1);
    let inner = tree.new_node("inner", vec![x, y], 0);
    let z = tree.new_node("z", vec![], 2);
    let left = tree.new_node("left", vec![inner, z], 0);
    let right = tree.new_node("right", vec![], 4);
    let root = tree.new_node("root", vec![left, right], 0);
    tree.layout(root, Rect::new(0, 0, 80, 40));
    Nested {
        tree,
        root,
        left,
        inner,
        x,
        z,
        right,
    }
}

fn expanded(tree: &TmTree<PlainNaming>, id: NodeId) -> bool {
    tree.node(id).unwrap().is_expanded()
}

// ============================================================
// Collapse
// ============================================================

#[rstest]
fn given_leaf_when_collapsing_then_parent_subtree_is_collapsed(mut nested: Nested) {
    nested.tree.collapse(nested.x);

    assert!(!expanded(&nested.tree, nested.inner));
    assert!(expanded(&nested.tree, nested.left));
    assert!(nested.tree.check_invariants(nested.root).is_ok());
}

#[rstest]
fn given_internal_node_when_collapsing_then_whole_parent_subtree_is_collapsed(
    mut nested: Nested,
) {
    nested.tree.collapse(nested.inner);

    assert!(!expanded(&nested.tree, nested.left));
    assert!(!expanded(&nested.tree, nested.inner));
    assert!(expanded(&nested.tree, nested.root));
    assert_eq!(
        nested.tree.display_units(nested.root),
        vec![nested.left, nested.right]
    );
}

#[rstest]
fn given_root_when_collapsing_then_nothing_changes(mut nested: Nested) {
    nested.tree.collapse(nested.root);

    assert!(expanded(&nested.tree, nested.root));
    assert!(expanded(&nested.tree, nested.inner));
}

#[rstest]
fn given_deep_node_when_collapsing_all_then_single_unit_remains(mut nested: Nested) {
    nested.tree.collapse_all(nested.x);

    for (id, node) in nested.tree.iter(nested.root) {
        assert!(!node.is_expanded(), "{id} still expanded");
    }
    assert_eq!(nested.tree.display_units(nested.root), vec![nested.root]);
}

// ============================================================
// Expand
// ============================================================

#[rstest]
fn given_collapsed_child_of_expanded_parent_when_expanding_then_children_are_laid_out(
    mut nested: Nested,
) {
    nested.tree.collapse(nested.x);
    assert_eq!(
        nested.tree.display_units(nested.root),
        vec![nested.inner, nested.z, nested.right]
    );

    nested.tree.expand(nested.inner);

    assert!(expanded(&nested.tree, nested.inner));
    let inner_rect = nested.tree.node(nested.inner).unwrap().rect();
    let x_rect = nested.tree.node(nested.x).unwrap().rect();
    assert_eq!((x_rect.x, x_rect.y), (inner_rect.x, inner_rect.y));
    assert_eq!(nested.tree.display_units(nested.root).len(), 4);
    assert!(nested.tree.check_invariants(nested.root).is_ok());
}

#[rstest]
fn given_node_under_collapsed_parent_when_expanding_then_no_op(mut nested: Nested) {
    nested.tree.collapse_all(nested.root);

    nested.tree.expand(nested.inner);

    assert!(!expanded(&nested.tree, nested.inner));
    assert!(nested.tree.check_invariants(nested.root).is_ok());
}

#[rstest]
fn given_leaf_when_expanding_then_no_op(mut nested: Nested) {
    nested.tree.expand(nested.z);
    nested.tree.expand_all(nested.right);

    assert!(!expanded(&nested.tree, nested.z));
    assert!(!expanded(&nested.tree, nested.right));
}

#[rstest]
fn given_collapsed_tree_when_expanding_all_from_root_then_every_internal_node_expands(
    mut nested: Nested,
) {
    nested.tree.collapse_all(nested.root);

    nested.tree.expand_all(nested.root);

    assert!(expanded(&nested.tree, nested.root));
    assert!(expanded(&nested.tree, nested.left));
    assert!(expanded(&nested.tree, nested.inner));
    assert!(!expanded(&nested.tree, nested.x));
    assert_eq!(nested.tree.display_units(nested.root).len(), 4);
    assert!(nested.tree.check_invariants(nested.root).is_ok());
}

#[rstest]
fn given_collapsed_root_when_expanding_one_level_then_grandchildren_stay_collapsed(
    mut nested: Nested,
) {
    nested.tree.collapse_all(nested.root);

    nested.tree.expand(nested.root);

    assert_eq!(
        nested.tree.display_units(nested.root),
        vec![nested.left, nested.right]
    );
}
