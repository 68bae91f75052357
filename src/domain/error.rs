//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural invariant violations found by [`TmTree::check_invariants`].
///
/// Public operations never produce these; front ends and tests use them to
/// verify a tree after building it or after a sequence of mutations.
///
/// [`TmTree::check_invariants`]: crate::domain::TmTree::check_invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node handle {0} does not belong to this tree")]
    UnknownNode(String),

    #[error("weight of {node} is {actual}, children sum to {expected}")]
    WeightMismatch {
        node: String,
        expected: u64,
        actual: u64,
    },

    #[error("empty tree sentinel {0} has children, a parent or a weight")]
    MalformedEmptyTree(String),

    #[error("{child} is listed {count} times under its parent {parent}")]
    ParentLink {
        child: String,
        parent: String,
        count: usize,
    },

    #[error("{child} is a child of {parent} but points to a different parent")]
    ChildLink { child: String, parent: String },

    #[error("{0} is expanded but has no children")]
    ExpandedLeaf(String),

    #[error("{node} is expanded below collapsed {parent}")]
    ExpandedUnderCollapsed { node: String, parent: String },
}
