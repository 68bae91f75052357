//! Structural mutations: moving leaves between parents and resizing leaves.

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, TmTree};
use crate::domain::naming::NamingScheme;

impl<N: NamingScheme> TmTree<N> {
    /// Moves leaf `id` to the end of `destination`'s children.
    ///
    /// Only a non-empty leaf can move, and only into a node that has children.
    /// Both weight chains (old parent and destination up to their roots) are
    /// refreshed. A parent left without children becomes a collapsed leaf of
    /// weight 0. Rectangles are not recomputed; call [`TmTree::layout`] on the
    /// affected root afterwards. Returns whether the move happened.
    #[instrument(level = "debug", skip(self))]
    pub fn move_leaf(&mut self, id: NodeId, destination: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if node.is_empty() || !node.is_leaf() {
            debug!(%id, "only leaves can move");
            return false;
        }
        if !self.node(destination).is_some_and(|d| !d.is_leaf()) {
            debug!(%destination, "destination must have children");
            return false;
        }

        let old_parent = node.parent;
        if let Some(parent) = old_parent {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|&child| child != id);
                if parent_node.children.is_empty() && parent != destination {
                    parent_node.weight = 0;
                    parent_node.expanded = false;
                }
            }
            self.refresh_chain(parent);
        }

        if let Some(node) = self.node_mut(id) {
            node.parent = Some(destination);
        }
        if let Some(destination_node) = self.node_mut(destination) {
            destination_node.children.push(id);
        }
        self.refresh_chain(destination);
        debug!(%id, ?old_parent, %destination, "moved leaf");
        true
    }

    /// Grows (`factor > 0`) or shrinks (`factor < 0`) leaf `id` by
    /// `ceil(weight * |factor|)`, at least 1.
    ///
    /// Shrinking saturates at 0. No-op for internal nodes, the empty tree and a
    /// zero or non-finite factor. Ancestor weights are left stale; refresh them
    /// with [`TmTree::recompute_ancestors`] or [`TmTree::recompute_weight`] on
    /// the root. Returns whether the weight changed.
    #[instrument(level = "debug", skip(self))]
    pub fn change_size(&mut self, id: NodeId, factor: f64) -> bool {
        if !factor.is_finite() || factor == 0.0 {
            return false;
        }
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.is_empty() || !node.is_leaf() {
            debug!(%id, "only leaves can be resized");
            return false;
        }

        // float-to-int `as` saturates, so huge products clamp to u64::MAX
        let delta = ((node.weight as f64) * factor.abs()).ceil() as u64;
        let delta = delta.max(1);
        let before = node.weight;
        node.weight = if factor > 0.0 {
            before.saturating_add(delta)
        } else {
            before.saturating_sub(delta)
        };
        debug!(%id, before, after = node.weight, "resized leaf");
        node.weight != before
    }
}
