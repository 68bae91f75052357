//! Read-only queries: display rectangles, hit testing and path strings.

use tracing::trace;

use crate::domain::arena::{NodeId, TmTree};
use crate::domain::colour::Colour;
use crate::domain::geometry::{Point, Rect};
use crate::domain::naming::NamingScheme;

impl<N: NamingScheme> TmTree<N> {
    /// Visible units below `id` in layout order: every leaf reached through
    /// expanded nodes plus every collapsed node met on the way.
    ///
    /// Zero-weight units are left out since layout never gives them an area.
    pub fn display_units(&self, id: NodeId) -> Vec<NodeId> {
        let mut units = Vec::new();
        self.collect_units(id, &mut units);
        units
    }

    fn collect_units(&self, id: NodeId, units: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.is_empty() || node.weight == 0 {
            return;
        }
        if node.is_leaf() || !node.expanded {
            units.push(id);
            return;
        }
        for &child in &node.children {
            self.collect_units(child, units);
        }
    }

    /// Rectangle and colour of every display unit below `id`.
    pub fn rectangles_for_display(&self, id: NodeId) -> Vec<(Rect, Colour)> {
        self.display_units(id)
            .into_iter()
            .filter_map(|unit| self.node(unit))
            .map(|node| (node.rect, node.colour))
            .collect()
    }

    /// Display unit below `id` whose rectangle contains `point` (edges
    /// included).
    ///
    /// A point on a shared edge matches several units; the one with the
    /// smallest x origin wins, then the smallest y origin.
    pub fn locate_leaf_at(&self, id: NodeId, point: Point) -> Option<NodeId> {
        let hit = self
            .display_units(id)
            .into_iter()
            .filter_map(|unit| self.node(unit).map(|node| (unit, node.rect)))
            .filter(|(_, rect)| rect.contains(point))
            .min_by_key(|(_, rect)| (rect.x, rect.y))
            .map(|(unit, _)| unit);
        trace!(%point, ?hit, "located");
        hit
    }

    /// Names from the root to `id` joined by the scheme's separator, with the
    /// scheme's suffix after the last name.
    pub fn path_string(&self, id: NodeId) -> String {
        self.render_path(id, false)
    }

    /// Like [`TmTree::path_string`] but with a suffix after every name.
    pub fn path_string_with_suffixes(&self, id: NodeId) -> String {
        self.render_path(id, true)
    }

    fn render_path(&self, id: NodeId, every_segment: bool) -> String {
        if self.node(id).map_or(true, |node| node.is_empty()) {
            return String::new();
        }
        let mut path = String::new();
        for (position, segment) in self.lineage(id).into_iter().enumerate() {
            let Some(node) = self.node(segment) else {
                continue;
            };
            if position > 0 {
                path.push_str(self.naming().separator());
            }
            path.push_str(node.name().unwrap_or_default());
            if every_segment || segment == id {
                path.push_str(self.naming().suffix(node.is_leaf()));
            }
        }
        path
    }
}
