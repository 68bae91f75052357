//! Tests for the headless viewer session.

use rstest::{fixture, rstest};

use tmtree::application::{Command, Viewer};
use tmtree::domain::{NodeId, PlainNaming, Point, Rect};
use tmtree::util::testing::{self, fixed_tree};

/// root (100x50)
/// ├── left: a (20), b (20)   -> x 0..40
/// └── right: c (60)          -> x 40..100
struct Session {
    viewer: Viewer<PlainNaming>,
    left: NodeId,
    a: NodeId,
    b: NodeId,
    right: NodeId,
    c: NodeId,
}

#[fixture]
fn session() -> Session {
    testing::init_test_setup();
    let mut tree = fixed_tree(PlainNaming);
    let a = tree.new_node("a", vec![], 20);
    let b = tree.new_node("b", vec![], 20);
    let left = tree.new_node("left", vec![a, b], 0);
    let c = tree.new_node("c", vec![], 60);
    let right = tree.new_node("right", vec![c], 0);
    let root = tree.new_node("root", vec![left, right], 0);
    let viewer = Viewer::new(tree, root, Rect::new(0, 0, 100, 50)).with_step(0.5);
    Session {
        viewer,
        left,
        a,
        b,
        right,
        c,
    }
}

// ============================================================
// Selection and hover
// ============================================================

#[rstest]
fn given_fresh_session_when_created_then_root_is_laid_out(session: Session) {
    let v = &session.viewer;
    assert_eq!(v.rectangles().len(), 3);
    assert_eq!(v.tree().node(session.right).unwrap().rect(), Rect::new(40, 0, 60, 50));
    assert_eq!(v.selected(), None);
}

#[rstest]
fn given_point_when_hovering_then_path_of_unit(session: Session) {
    assert_eq!(
        session.viewer.hover_at(Point::new(70, 10)),
        Some("root/right/c".to_string())
    );
    assert_eq!(session.viewer.hover_at(Point::new(500, 10)), None);
}

#[rstest]
fn given_unit_when_selecting_twice_then_selection_toggles(mut session: Session) {
    let v = &mut session.viewer;

    assert_eq!(v.select_at(Point::new(5, 5)), Some(session.a));
    assert_eq!(v.status(), Some("root/left/a (20)".to_string()));
    assert_eq!(v.select_at(Point::new(5, 5)), None);
    assert_eq!(v.status(), None);
}

#[rstest]
fn given_no_selection_when_applying_command_then_ignored(mut session: Session) {
    assert!(!session.viewer.apply(Command::Grow));
}

// ============================================================
// Commands
// ============================================================

#[rstest]
fn given_selected_leaf_when_growing_then_weights_and_layout_refresh(mut session: Session) {
    let v = &mut session.viewer;
    v.select_at(Point::new(70, 10));

    assert!(v.apply(Command::Grow));

    let tree = v.tree();
    assert_eq!(tree.node(session.c).unwrap().weight(), 90);
    assert_eq!(tree.node(v.root()).unwrap().weight(), 130);
    assert!(tree.check_invariants(v.root()).is_ok());
    let area: i64 = v.rectangles().iter().map(|(r, _)| r.area()).sum();
    assert_eq!(area, v.screen().area());
}

#[rstest]
fn given_selected_leaf_when_collapsing_then_selection_moves_to_parent(mut session: Session) {
    let v = &mut session.viewer;
    v.select_at(Point::new(5, 5));

    v.apply(Command::Collapse);

    assert_eq!(v.selected(), Some(session.left));
    assert_eq!(v.rectangles().len(), 2);
    assert_eq!(v.hover_at(Point::new(5, 5)), Some("root/left".to_string()));
}

#[rstest]
fn given_collapsed_parent_selected_when_expanding_then_children_show_again(
    mut session: Session,
) {
    let v = &mut session.viewer;
    v.select_at(Point::new(5, 5));
    v.apply(Command::Collapse);

    v.apply(Command::Expand);

    assert_eq!(v.rectangles().len(), 3);
}

#[rstest]
fn given_selection_when_collapsing_all_then_root_is_selected_and_shown_alone(
    mut session: Session,
) {
    let v = &mut session.viewer;
    v.select_at(Point::new(5, 5));

    v.apply(Command::CollapseAll);

    assert_eq!(v.selected(), Some(v.root()));
    assert_eq!(v.rectangles(), vec![(v.screen(), v.tree().node(v.root()).unwrap().colour())]);

    v.apply(Command::ExpandAll);
    assert_eq!(v.rectangles().len(), 3);
}

#[rstest]
fn given_selected_leaf_when_moving_onto_leaf_then_lands_in_its_parent(mut session: Session) {
    let v = &mut session.viewer;
    v.select_at(Point::new(5, 5));

    assert!(v.apply(Command::MoveSelectedTo(Point::new(70, 10))));

    let tree = v.tree();
    assert_eq!(tree.node(session.a).unwrap().parent(), Some(session.right));
    assert_eq!(tree.node(session.right).unwrap().children(), &[session.c, session.a]);
    assert_eq!(tree.node(session.left).unwrap().children(), &[session.b]);
    assert_eq!(tree.node(session.left).unwrap().weight(), 20);
    assert!(tree.check_invariants(v.root()).is_ok());
}

#[rstest]
fn given_collapsed_folder_under_point_when_moving_then_lands_inside_it(mut session: Session) {
    let v = &mut session.viewer;
    // collapse "right" by collapsing from its child
    v.select_at(Point::new(70, 10));
    v.apply(Command::Collapse);
    v.select_at(Point::new(5, 5));
    assert_eq!(v.selected(), Some(session.a));

    v.apply(Command::MoveSelectedTo(Point::new(70, 10)));

    assert_eq!(v.tree().node(session.a).unwrap().parent(), Some(session.right));
}
