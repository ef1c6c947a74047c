//! Error types for dreamlens-core

use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::models::DreamId;

/// Result type alias using dreamlens-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dreamlens-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session or credential handling failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Dream is not present in the local list
    #[error("Dream not found: {0}")]
    NotFound(DreamId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
