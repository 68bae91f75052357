//! Errors raised while building trees from external data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid paper dataset: {0}")]
    Dataset(#[from] csv::Error),
}

/// Result type for tree builders.
pub type VariantResult<T> = Result<T, VariantError>;
