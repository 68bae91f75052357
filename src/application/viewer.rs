//! Headless treemap session.
//!
//! Holds a tree, the root being displayed, the screen area and the current
//! selection, and turns user commands into core operations followed by a
//! weight refresh and a fresh layout. Rendering and input decoding belong to
//! whatever front end drives it.

use tracing::{debug, info, instrument};

use crate::domain::{Colour, NamingScheme, NodeId, Point, Rect, TmTree};

/// Default relative growth/shrink step for [`Command::Grow`]/[`Command::Shrink`].
pub const DEFAULT_STEP: f64 = 0.01;

/// User actions applied to the selected node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Expand,
    ExpandAll,
    Collapse,
    CollapseAll,
    Grow,
    Shrink,
    /// Move the selected leaf into the folder/category under the point.
    MoveSelectedTo(Point),
}

#[derive(Debug)]
pub struct Viewer<N: NamingScheme> {
    tree: TmTree<N>,
    root: NodeId,
    screen: Rect,
    selected: Option<NodeId>,
    step: f64,
}

impl<N: NamingScheme> Viewer<N> {
    /// Takes ownership of `tree` and lays `root` out over `screen`.
    pub fn new(tree: TmTree<N>, root: NodeId, screen: Rect) -> Self {
        let mut viewer = Self {
            tree,
            root,
            screen,
            selected: None,
            step: DEFAULT_STEP,
        };
        viewer.refresh();
        viewer
    }

    /// Relative step used by grow/shrink.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn tree(&self) -> &TmTree<N> {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// New screen size, e.g. after a window resize.
    pub fn resize(&mut self, screen: Rect) {
        self.screen = screen;
        self.refresh();
    }

    pub fn rectangles(&self) -> Vec<(Rect, Colour)> {
        self.tree.rectangles_for_display(self.root)
    }

    /// Path of the display unit under `point`, for hover text.
    pub fn hover_at(&self, point: Point) -> Option<String> {
        self.tree
            .locate_leaf_at(self.root, point)
            .map(|unit| self.tree.path_string(unit))
    }

    /// Selects the unit under `point`; picking the selected unit again, or
    /// empty space, clears the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn select_at(&mut self, point: Point) -> Option<NodeId> {
        let hit = self.tree.locate_leaf_at(self.root, point);
        self.selected = if hit == self.selected { None } else { hit };
        debug!(selected = ?self.selected, "selection changed");
        self.selected
    }

    /// "path (weight)" of the selection.
    pub fn status(&self) -> Option<String> {
        let selected = self.selected?;
        let node = self.tree.node(selected)?;
        Some(format!("{} ({})", self.tree.path_string(selected), node.weight()))
    }

    /// Applies `command` to the selection and refreshes weights and layout.
    /// Returns false when nothing is selected.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, command: Command) -> bool {
        let Some(selected) = self.selected else {
            debug!("no selection");
            return false;
        };

        match command {
            Command::Expand => self.tree.expand(selected),
            Command::ExpandAll => self.tree.expand_all(selected),
            Command::Collapse => {
                let parent = self.tree.node(selected).and_then(|n| n.parent());
                self.tree.collapse(selected);
                if parent.is_some() {
                    self.selected = parent;
                }
            }
            Command::CollapseAll => {
                self.tree.collapse_all(selected);
                self.selected = Some(self.tree.root_of(selected));
            }
            Command::Grow => {
                self.tree.change_size(selected, self.step);
            }
            Command::Shrink => {
                self.tree.change_size(selected, -self.step);
            }
            Command::MoveSelectedTo(point) => {
                if let Some(destination) = self.destination_at(point) {
                    if self.tree.move_leaf(selected, destination) {
                        info!(
                            moved = %self.tree.path_string(selected),
                            "moved selection"
                        );
                    }
                }
            }
        }
        self.refresh();
        true
    }

    /// The unit under `point` if it has children, else its parent.
    fn destination_at(&self, point: Point) -> Option<NodeId> {
        let unit = self.tree.locate_leaf_at(self.root, point)?;
        let node = self.tree.node(unit)?;
        if node.is_leaf() {
            node.parent()
        } else {
            Some(unit)
        }
    }

    fn refresh(&mut self) {
        self.tree.recompute_weight(self.root);
        self.tree.layout(self.root, self.screen);
        debug_assert!(
            self.tree.check_invariants(self.root).is_ok(),
            "tree invariants broken: {:?}",
            self.tree.check_invariants(self.root)
        );
    }
}
