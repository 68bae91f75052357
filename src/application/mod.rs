//! Application layer: viewer session and errors
//!
//! This layer orchestrates domain logic for front ends.

pub mod error;
pub mod viewer;

pub use error::{ApplicationError, ApplicationResult};
pub use viewer::{Command, Viewer, DEFAULT_STEP};
