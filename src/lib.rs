//! tmtree: treemap trees.
//!
//! Weighted hierarchies (directories, categorized papers) held in an arena,
//! laid out as nested rectangles whose areas follow the weights, with
//! expand/collapse, move and resize operations on top.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
pub mod variants;
