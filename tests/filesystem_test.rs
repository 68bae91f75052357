//! Tests for building treemap trees from directories.

use std::fs;
use std::path::{Path, MAIN_SEPARATOR_STR};

use tempfile::TempDir;

use tmtree::domain::Rect;
use tmtree::util::testing::{self, fixed_tree};
use tmtree::variants::{build_file_system_tree, FileSystemNaming, FileSystemTree, VariantError};

fn write_file(path: &Path, size: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![b'x'; size]).unwrap();
}

fn new_tree() -> FileSystemTree {
    testing::init_test_setup();
    fixed_tree(FileSystemNaming)
}

// ============================================================
// Structure and weights
// ============================================================

#[test]
fn given_folder_with_one_file_when_building_then_path_string_names_both() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write_file(&docs.join("a.txt"), 10);
    let mut tree = new_tree();

    let root = build_file_system_tree(&mut tree, &docs).unwrap();

    let leaf = tree.node(root).unwrap().children()[0];
    assert_eq!(
        tree.path_string(leaf),
        format!("docs{}a.txt (file)", MAIN_SEPARATOR_STR)
    );
    assert_eq!(tree.path_string(root), "docs (folder)");
    assert_eq!(tree.node(leaf).unwrap().weight(), 10);
    assert_eq!(tree.node(leaf).unwrap().meta(), &docs.join("a.txt"));
}

#[test]
fn given_nested_folders_when_building_then_weights_are_byte_sums() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("project");
    write_file(&base.join("b.txt"), 30);
    write_file(&base.join("a.txt"), 5);
    write_file(&base.join("src").join("main.rs"), 100);
    write_file(&base.join("src").join("lib.rs"), 20);
    let mut tree = new_tree();

    let root = build_file_system_tree(&mut tree, &base).unwrap();

    assert_eq!(tree.node(root).unwrap().weight(), 155);
    let names: Vec<_> = tree
        .node(root)
        .unwrap()
        .children()
        .iter()
        .map(|&c| tree.node(c).unwrap().name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "src"]);
    assert_eq!(tree.depth(root), 3);
    assert!(tree.check_invariants(root).is_ok());
}

#[test]
fn given_single_file_when_building_then_root_is_leaf() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.md");
    write_file(&file, 42);
    let mut tree = new_tree();

    let root = build_file_system_tree(&mut tree, &file).unwrap();

    let node = tree.node(root).unwrap();
    assert!(node.is_leaf());
    assert_eq!(node.weight(), 42);
    assert_eq!(tree.path_string(root), "notes.md (file)");
}

#[test]
fn given_empty_folder_when_building_then_zero_weight_leaf() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base");
    fs::create_dir_all(base.join("empty")).unwrap();
    write_file(&base.join("data.bin"), 8);
    let mut tree = new_tree();

    let root = build_file_system_tree(&mut tree, &base).unwrap();
    tree.layout(root, Rect::new(0, 0, 100, 100));

    let empty = tree.node(root).unwrap().children()[1];
    let node = tree.node(empty).unwrap();
    assert_eq!(node.name(), Some("empty"));
    assert!(node.is_leaf());
    assert_eq!(node.weight(), 0);
    assert_eq!(tree.rectangles_for_display(root).len(), 1);
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_missing_path_when_building_then_not_found() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    let mut tree = new_tree();

    let result = build_file_system_tree(&mut tree, &missing);

    assert!(matches!(result, Err(VariantError::NotFound(path)) if path == missing));
    assert_eq!(tree.node_count(), 0);
}
