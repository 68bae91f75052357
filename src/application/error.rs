//! Application-level errors (wraps domain and variant errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::variants::VariantError;

/// Application errors wrap lower layers and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Variant(#[from] VariantError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
