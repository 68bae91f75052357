/*
Terminal rendering of treemap trees via termtree.

Defined as a trait so the CLI can print any TmTree regardless of its naming
scheme, and so further renderings can be added without touching the domain.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{NamingScheme, NodeId, TmTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self, root: NodeId) -> Tree<String>;
}

impl<N: NamingScheme> TreeNodeConvert for TmTree<N> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: NodeId) -> Tree<String> {
        let Some(node) = self.node(root) else {
            return Tree::new("Empty tree".to_string());
        };
        let label = match node.name() {
            Some(name) => format!("{} ({})", name, node.weight()),
            None => "Empty tree".to_string(),
        };

        let leaves: Vec<_> = node
            .children()
            .iter()
            .map(|&child| self.to_tree_string(child))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}
