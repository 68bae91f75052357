//! Filesystem-backed treemap trees: folders are internal nodes, files are
//! leaves weighted by their byte length.

use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use crate::domain::{NamingScheme, NodeId, TmTree};
use crate::util::path::display_name;
use crate::variants::error::{VariantError, VariantResult};

/// OS path separator between names; " (file)" / " (folder)" suffixes.
///
/// Each node carries the full path of the entry it was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSystemNaming;

impl NamingScheme for FileSystemNaming {
    type Meta = PathBuf;

    fn separator(&self) -> &str {
        MAIN_SEPARATOR_STR
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf {
            " (file)"
        } else {
            " (folder)"
        }
    }
}

pub type FileSystemTree = TmTree<FileSystemNaming>;

/// Builds the subtree for the file or folder at `path` and returns its root.
///
/// Entries are visited contents-first, so every folder is constructed after
/// all of its children. Siblings are ordered by file name; symlinks are not
/// followed. An empty folder becomes a leaf of weight 0.
#[instrument(level = "debug", skip(tree))]
pub fn build_file_system_tree(tree: &mut FileSystemTree, path: &Path) -> VariantResult<NodeId> {
    if std::fs::symlink_metadata(path).is_err() {
        return Err(VariantError::NotFound(path.to_path_buf()));
    }

    // pending[d] collects finished nodes at depth d until their parent is built
    let mut pending: Vec<Vec<NodeId>> = Vec::new();
    for entry in WalkDir::new(path).contents_first(true).sort_by_file_name() {
        let entry = entry?;
        let depth = entry.depth();
        if pending.len() < depth + 2 {
            pending.resize_with(depth + 2, Vec::new);
        }

        let name = if depth == 0 {
            display_name(entry.path())
        } else {
            entry.file_name().to_string_lossy().into_owned()
        };

        let node = if entry.file_type().is_dir() {
            let children = std::mem::take(&mut pending[depth + 1]);
            trace!(path = %entry.path().display(), children = children.len(), "folder");
            tree.new_node_with_meta(name, children, 0, entry.path().to_path_buf())
        } else {
            let size = entry.metadata()?.len();
            tree.new_node_with_meta(name, Vec::new(), size, entry.path().to_path_buf())
        };
        pending[depth].push(node);
    }

    let root = pending
        .first_mut()
        .and_then(Vec::pop)
        .ok_or_else(|| VariantError::NotFound(path.to_path_buf()))?;
    debug!(
        root = %tree.path_string(root),
        weight = tree.node(root).map_or(0, |n| n.weight()),
        "built filesystem tree"
    );
    Ok(root)
}
