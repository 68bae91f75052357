//! Arena-backed treemap tree: node storage, construction and weight aggregation.
//!
//! All nodes of a [`TmTree`] live in one generational arena. A node owns the
//! ordered list of its children's handles; its parent handle is navigation
//! only. Trees are assembled bottom-up: children are constructed first and
//! handed to their parent's constructor, which adopts them and sums their
//! weights.

use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::{instrument, trace};

use crate::domain::colour::{Colour, ColourSource};
use crate::domain::error::DomainError;
use crate::domain::geometry::Rect;
use crate::domain::naming::NamingScheme;

/// Handle to a node stored in a [`TmTree`].
///
/// Handles are generational: once a node is gone its handle never resolves
/// to another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}.{generation}")
    }
}

/// One node of the treemap hierarchy.
#[derive(Debug)]
pub struct TmNode<M> {
    /// None only for the empty-tree sentinel
    pub(crate) name: Option<String>,
    /// Authoritative for leaves, sum of children otherwise
    pub(crate) weight: u64,
    pub(crate) colour: Colour,
    /// Display area; assigned by layout
    pub(crate) rect: Rect,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) expanded: bool,
    pub(crate) meta: M,
}

impl<M> TmNode<M> {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True for the empty-tree sentinel.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn meta(&self) -> &M {
        &self.meta
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<empty>".to_string())
    }
}

/// A forest of treemap nodes sharing one naming scheme and colour source.
pub struct TmTree<N: NamingScheme> {
    pub(crate) arena: Arena<TmNode<N::Meta>>,
    naming: N,
    colours: Box<dyn ColourSource>,
}

impl<N> fmt::Debug for TmTree<N>
where
    N: NamingScheme + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmTree")
            .field("nodes", &self.arena.len())
            .field("naming", &self.naming)
            .field("colours", &self.colours)
            .finish()
    }
}

impl<N: NamingScheme> TmTree<N> {
    pub fn new(naming: N, colours: Box<dyn ColourSource>) -> Self {
        Self {
            arena: Arena::new(),
            naming,
            colours,
        }
    }

    pub fn naming(&self) -> &N {
        &self.naming
    }

    /// Number of live nodes across every tree in the arena.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<&TmNode<N::Meta>> {
        self.arena.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut TmNode<N::Meta>> {
        self.arena.get_mut(id.0)
    }

    /// Named node with default payload; see [`TmTree::construct`].
    pub fn new_node(
        &mut self,
        name: impl Into<String>,
        children: Vec<NodeId>,
        leaf_weight: u64,
    ) -> NodeId
    where
        N::Meta: Default,
    {
        self.construct(Some(name.into()), children, leaf_weight, N::Meta::default())
    }

    /// Named node carrying a variant payload; see [`TmTree::construct`].
    pub fn new_node_with_meta(
        &mut self,
        name: impl Into<String>,
        children: Vec<NodeId>,
        leaf_weight: u64,
        meta: N::Meta,
    ) -> NodeId {
        self.construct(Some(name.into()), children, leaf_weight, meta)
    }

    /// The empty-tree sentinel: no name, no children, weight 0.
    pub fn new_empty(&mut self) -> NodeId
    where
        N::Meta: Default,
    {
        self.construct(None, Vec::new(), 0, N::Meta::default())
    }

    /// Creates a node and adopts `children` in the given order.
    ///
    /// A leaf takes `leaf_weight`; a node with children ignores it and sums the
    /// children's weights instead. Nodes with children start expanded, leaves
    /// and the sentinel start collapsed.
    ///
    /// # Panics
    ///
    /// If `name` is `None` while `children` is non-empty, or if a child is not
    /// part of this arena, already has a parent, is listed twice, or is the
    /// empty-tree sentinel. These are caller bugs that would corrupt the tree.
    #[instrument(level = "trace", skip(self, children, meta))]
    pub fn construct(
        &mut self,
        name: Option<String>,
        children: Vec<NodeId>,
        leaf_weight: u64,
        meta: N::Meta,
    ) -> NodeId {
        assert!(
            name.is_some() || children.is_empty(),
            "an unnamed (empty) tree cannot have children"
        );
        assert!(
            children.iter().all_unique(),
            "a child cannot be adopted twice by the same parent"
        );

        let mut weight = 0u64;
        for &child in &children {
            let Some(node) = self.arena.get(child.0) else {
                panic!("child {child} is not part of this tree");
            };
            assert!(!node.is_empty(), "the empty tree cannot become a child");
            assert!(node.parent.is_none(), "child {child} already has a parent");
            weight = weight.saturating_add(node.weight);
        }

        if children.is_empty() {
            weight = if name.is_some() { leaf_weight } else { 0 };
        }

        let expanded = !children.is_empty();
        let node = TmNode {
            name,
            weight,
            colour: self.colours.next_colour(),
            rect: Rect::default(),
            children,
            parent: None,
            expanded,
            meta,
        };
        let id = NodeId(self.arena.insert(node));

        let adopted = self.arena.get(id.0).map(|n| n.children.clone()).unwrap_or_default();
        for child in adopted {
            if let Some(node) = self.arena.get_mut(child.0) {
                node.parent = Some(id);
            }
        }
        trace!(%id, weight, "constructed node");
        id
    }

    /// Recomputes the aggregate weight of `id` and every internal descendant.
    ///
    /// Leaves keep their stored weight. Ancestors of `id` are not touched; use
    /// [`TmTree::recompute_ancestors`] for those.
    pub fn recompute_weight(&mut self, id: NodeId) -> u64 {
        let Some(node) = self.arena.get(id.0) else {
            return 0;
        };
        if node.is_empty() {
            return 0;
        }
        if node.children.is_empty() {
            return node.weight;
        }
        let children = node.children.clone();
        let total = children
            .into_iter()
            .fold(0u64, |acc, child| acc.saturating_add(self.recompute_weight(child)));
        if let Some(node) = self.arena.get_mut(id.0) {
            node.weight = total;
        }
        total
    }

    /// Refreshes the aggregates of every proper ancestor of `id`, bottom-up.
    pub fn recompute_ancestors(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).and_then(TmNode::parent) {
            self.refresh_chain(parent);
        }
    }

    /// Re-sums direct children for `start` and each ancestor up to the root.
    /// Childless nodes on the chain keep their stored weight.
    pub(crate) fn refresh_chain(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let total = match self.arena.get(id.0) {
                Some(node) if !node.children.is_empty() => Some(
                    node.children
                        .iter()
                        .filter_map(|c| self.arena.get(c.0))
                        .fold(0u64, |acc, c| acc.saturating_add(c.weight)),
                ),
                Some(_) => None,
                None => return,
            };
            let Some(node) = self.arena.get_mut(id.0) else {
                return;
            };
            if let Some(total) = total {
                node.weight = total;
            }
            current = node.parent;
        }
    }

    /// Topmost ancestor of `id` (itself when it has no parent).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).and_then(TmNode::parent) {
            current = parent;
        }
        current
    }

    /// Handles from the root down to `id`, both inclusive.
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).and_then(TmNode::parent) {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Number of levels in the subtree rooted at `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |node| {
            1 + node
                .children
                .iter()
                .map(|&child| self.depth(child))
                .max()
                .unwrap_or(0)
        })
    }

    /// Leaves of the subtree rooted at `id`, left to right.
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        self.iter(id)
            .filter(|(_, node)| node.is_leaf() && !node.is_empty())
            .map(|(leaf, _)| leaf)
            .collect()
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    pub fn iter(&self, id: NodeId) -> SubtreeIter<'_, N::Meta> {
        SubtreeIter::new(&self.arena, id)
    }

    /// Verifies the structural invariants for every node below `root`.
    #[instrument(level = "debug", skip(self))]
    pub fn check_invariants(&self, root: NodeId) -> Result<(), DomainError> {
        if !self.contains(root) {
            return Err(DomainError::UnknownNode(root.to_string()));
        }
        for (id, node) in self.iter(root) {
            if node.is_empty()
                && (!node.children.is_empty() || node.parent.is_some() || node.weight != 0)
            {
                return Err(DomainError::MalformedEmptyTree(id.to_string()));
            }

            if !node.children.is_empty() {
                let expected = node
                    .children
                    .iter()
                    .filter_map(|c| self.node(*c))
                    .fold(0u64, |acc, c| acc.saturating_add(c.weight));
                if expected != node.weight {
                    return Err(DomainError::WeightMismatch {
                        node: node.label(),
                        expected,
                        actual: node.weight,
                    });
                }
            }

            for &child in &node.children {
                let Some(child_node) = self.node(child) else {
                    return Err(DomainError::UnknownNode(child.to_string()));
                };
                if child_node.parent != Some(id) {
                    return Err(DomainError::ChildLink {
                        child: child_node.label(),
                        parent: node.label(),
                    });
                }
            }

            if let Some(parent) = node.parent {
                let Some(parent_node) = self.node(parent) else {
                    return Err(DomainError::UnknownNode(parent.to_string()));
                };
                let count = parent_node.children.iter().filter(|&&c| c == id).count();
                if count != 1 {
                    return Err(DomainError::ParentLink {
                        child: node.label(),
                        parent: parent_node.label(),
                        count,
                    });
                }
                if node.expanded && !parent_node.expanded {
                    return Err(DomainError::ExpandedUnderCollapsed {
                        node: node.label(),
                        parent: parent_node.label(),
                    });
                }
            }

            if node.expanded && node.children.is_empty() {
                return Err(DomainError::ExpandedLeaf(node.label()));
            }
        }
        Ok(())
    }
}

/// Pre-order iterator over a subtree, children visited left to right.
pub struct SubtreeIter<'a, M> {
    arena: &'a Arena<TmNode<M>>,
    stack: Vec<NodeId>,
}

impl<'a, M> SubtreeIter<'a, M> {
    fn new(arena: &'a Arena<TmNode<M>>, root: NodeId) -> Self {
        let stack = if arena.contains(root.0) {
            vec![root]
        } else {
            Vec::new()
        };
        Self { arena, stack }
    }
}

impl<'a, M> Iterator for SubtreeIter<'a, M> {
    type Item = (NodeId, &'a TmNode<M>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get(current.0) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev().copied());
                return Some((current, node));
            }
        }
        None
    }
}
