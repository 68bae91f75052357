//! Domain layer: the treemap tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod colour;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod mutation;
pub mod naming;
pub mod query;
pub mod visibility;

pub use arena::{NodeId, SubtreeIter, TmNode, TmTree};
pub use colour::{Colour, ColourSource, FixedColours, RandomColours};
pub use error::DomainError;
pub use geometry::{Point, Rect};
pub use layout::{partition, Axis};
pub use naming::{NamingScheme, PlainNaming};
