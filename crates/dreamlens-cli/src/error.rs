use std::io;

use dreamlens_core::api::ApiError;
use dreamlens_core::auth::AuthError;
use dreamlens_core::DreamId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] dreamlens_core::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No prompt provided")]
    EmptyPrompt,
    #[error("Dream not found: {0}")]
    DreamNotFound(DreamId),
    #[error("Refusing to {0} without --yes")]
    ConfirmationRequired(&'static str),
    #[error("Failed to save image: {0}")]
    ImageDownload(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Profile '{0}' has no API base URL. Run `dreamlens config init --api-base-url <URL>` or set DREAMLENS_API_BASE_URL."
    )]
    NotConfigured(String),
}
