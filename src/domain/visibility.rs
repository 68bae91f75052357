//! Expand/collapse state machine.
//!
//! A node is either expanded (children laid out individually) or collapsed
//! (shown as one rectangle). Expansion only ever happens below an expanded
//! parent and collapse always propagates down, so an expanded node always has
//! an expanded parent.

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, TmNode, TmTree};
use crate::domain::naming::NamingScheme;

impl<N: NamingScheme> TmTree<N> {
    fn expandable(&self, id: NodeId) -> Option<&TmNode<N::Meta>> {
        let node = self.node(id)?;
        if node.is_empty() || node.is_leaf() {
            return None;
        }
        match node.parent {
            Some(parent) if !self.node(parent).is_some_and(TmNode::is_expanded) => None,
            _ => Some(node),
        }
    }

    /// Shows the children of `id` within its current rectangle.
    ///
    /// No-op for leaves, already expanded nodes, and nodes whose parent is
    /// collapsed.
    #[instrument(level = "debug", skip(self))]
    pub fn expand(&mut self, id: NodeId) {
        let Some(node) = self.expandable(id) else {
            debug!(%id, "not expandable");
            return;
        };
        if node.expanded {
            return;
        }
        let rect = node.rect;
        if let Some(node) = self.node_mut(id) {
            node.expanded = true;
        }
        self.layout(id, rect);
    }

    /// Expands `id` and every internal node below it, then re-lays out `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn expand_all(&mut self, id: NodeId) {
        let Some(node) = self.expandable(id) else {
            debug!(%id, "not expandable");
            return;
        };
        let rect = node.rect;
        let internal: Vec<NodeId> = self
            .iter(id)
            .filter(|(_, node)| !node.is_leaf())
            .map(|(internal, _)| internal)
            .collect();
        for internal in internal {
            if let Some(node) = self.node_mut(internal) {
                node.expanded = true;
            }
        }
        self.layout(id, rect);
    }

    /// Collapses the parent of `id` together with all of the parent's
    /// descendants ("zoom out one level"). No-op for a root.
    #[instrument(level = "debug", skip(self))]
    pub fn collapse(&mut self, id: NodeId) {
        match self.node(id).and_then(TmNode::parent) {
            Some(parent) => self.collapse_subtree(parent),
            None => debug!(%id, "root cannot be collapsed into its parent"),
        }
    }

    /// Collapses the whole tree containing `id`, starting from its root.
    #[instrument(level = "debug", skip(self))]
    pub fn collapse_all(&mut self, id: NodeId) {
        if self.contains(id) {
            let root = self.root_of(id);
            self.collapse_subtree(root);
        }
    }

    fn collapse_subtree(&mut self, id: NodeId) {
        let members: Vec<NodeId> = self.iter(id).map(|(member, _)| member).collect();
        for member in members {
            if let Some(node) = self.node_mut(member) {
                node.expanded = false;
            }
        }
    }
}
