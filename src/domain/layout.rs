//! Proportional slice layout.
//!
//! A node's rectangle is cut into strips along its longer side, one strip per
//! child, each as wide as the child's share of the parent weight (rounded
//! down). The last child absorbs the rounding remainder so the strips tile the
//! parent exactly.

use tracing::{instrument, trace};

use crate::domain::arena::{NodeId, TmTree};
use crate::domain::geometry::Rect;
use crate::domain::naming::NamingScheme;

/// Direction in which a rectangle is subdivided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Along the width: children become side-by-side vertical strips.
    X,
    /// Along the height: children become stacked horizontal strips.
    Y,
}

impl Axis {
    /// Wider-than-tall rectangles split along x, everything else along y.
    pub fn of(rect: Rect) -> Self {
        if rect.width > rect.height {
            Axis::X
        } else {
            Axis::Y
        }
    }

    pub fn extent(self, rect: Rect) -> i32 {
        match self {
            Axis::X => rect.width,
            Axis::Y => rect.height,
        }
    }

    pub fn origin(self, rect: Rect) -> i32 {
        match self {
            Axis::X => rect.x,
            Axis::Y => rect.y,
        }
    }

    /// Strip of `parent` starting at `offset` on this axis, `extent` long.
    pub fn strip(self, parent: Rect, offset: i32, extent: i32) -> Rect {
        match self {
            Axis::X => Rect::new(offset, parent.y, extent, parent.height),
            Axis::Y => Rect::new(parent.x, offset, parent.width, extent),
        }
    }
}

/// Splits `extent` into one strip per weight, proportional to `weight / total`.
///
/// Every strip but the last is `floor(extent * weight / total)`, capped at the
/// extent still unused; the last strip takes whatever remains, so the strips
/// always sum to `extent`. Negative extents count as zero. With `total == 0`
/// there is nothing to share and every strip is zero.
pub fn partition(extent: i32, weights: &[u64], total: u64) -> Vec<i32> {
    let extent = extent.max(0);
    if total == 0 {
        return vec![0; weights.len()];
    }

    let mut strips = Vec::with_capacity(weights.len());
    let mut used = 0i32;
    for (position, &weight) in weights.iter().enumerate() {
        let remaining = extent - used;
        let strip = if position + 1 == weights.len() {
            remaining
        } else {
            let share = i128::from(extent) * i128::from(weight) / i128::from(total);
            i32::try_from(share).unwrap_or(i32::MAX).min(remaining)
        };
        strips.push(strip);
        used += strip;
    }
    strips
}

impl<N: NamingScheme> TmTree<N> {
    /// Assigns `rect` to `id` and, if it is expanded, subdivides it among its
    /// children recursively.
    ///
    /// Empty and zero-weight nodes are skipped entirely. Leaves and collapsed
    /// nodes keep `rect` as their single display area.
    #[instrument(level = "trace", skip(self))]
    pub fn layout(&mut self, id: NodeId, rect: Rect) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.is_empty() || node.weight == 0 {
            trace!(%id, "nothing to lay out");
            return;
        }
        node.rect = rect;
        if node.children.is_empty() || !node.expanded {
            return;
        }

        let total = node.weight;
        let children = node.children.clone();
        let weights: Vec<u64> = children
            .iter()
            .map(|&child| self.node(child).map_or(0, |n| n.weight))
            .collect();

        let axis = Axis::of(rect);
        let strips = partition(axis.extent(rect), &weights, total);
        let mut offset = axis.origin(rect);
        for (child, extent) in children.into_iter().zip(strips) {
            let child_rect = axis.strip(rect, offset, extent);
            offset = offset.saturating_add(extent);
            self.layout(child, child_rect);
        }
    }
}
