//! REST client for the Dreamlens backend.
//!
//! One [`DreamlensClient`] covers auth, dream and image endpoints. Every
//! authenticated call reads the bearer token from the injected session store,
//! so a logout elsewhere takes effect on the next request.

mod auth;
mod dreams;
mod images;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::{AuthError, SessionPersistence};
use crate::config::ClientConfig;
use crate::util::compact_text;

pub use dreams::{DreamStore, INCLUDE_ARCHIVED};
pub use images::ImageGenerator;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Authentication failed: {0}")]
    Unauthorized(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Unexpected response: {0}")]
    Unexpected(String),
    #[error("Failed to parse response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Not signed in. Run `dreamlens auth login` first.")]
    NotSignedIn,
    #[error(transparent)]
    Session(#[from] AuthError),
}

impl ApiError {
    /// Classifies a non-success response by status code.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = parse_api_error(status, body);
        match status.as_u16() {
            400 | 422 => Self::Validation(message),
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            500..=599 => Self::Server(message),
            _ => Self::Unexpected(message),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct DreamlensClient<S: SessionPersistence> {
    base_url: String,
    client: reqwest::Client,
    store: S,
}

impl<S: SessionPersistence> DreamlensClient<S> {
    pub fn new(config: &ClientConfig, store: S) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Whether a bearer token is currently stored.
    pub fn has_session(&self) -> ApiResult<bool> {
        Ok(self.store.load_session()?.is_some())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        let session = self.store.load_session()?.ok_or(ApiError::NotSignedIn)?;
        Ok(request.bearer_auth(&session.access_token))
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.header("Accept", "application/json").send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_status(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

async fn send_empty(request: RequestBuilder) -> ApiResult<()> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, &body));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<ErrorDetail>,
    message: Option<String>,
    error: Option<String>,
}

/// FastAPI reports either a plain string or a list of field errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl FieldError {
    fn render(&self) -> String {
        match self.loc.last().and_then(serde_json::Value::as_str) {
            Some(field) => format!("{field}: {}", self.msg),
            None => self.msg.clone(),
        }
    }
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorResponse>(body) {
        let message = match payload.detail {
            Some(ErrorDetail::Message(message)) => Some(message),
            Some(ErrorDetail::Fields(fields)) if !fields.is_empty() => Some(
                fields
                    .iter()
                    .map(FieldError::render)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => payload.message.or(payload.error),
        };
        if let Some(message) = message {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_error_reads_string_detail() {
        let message = parse_api_error(StatusCode::NOT_FOUND, r#"{"detail":"Dream not found"}"#);
        assert_eq!(message, "Dream not found (404)");
    }

    #[test]
    fn parse_api_error_joins_field_errors() {
        let body = r#"{"detail":[{"loc":["body","title"],"msg":"field required","type":"missing"}]}"#;
        let message = parse_api_error(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(message, "title: field required (422)");
    }

    #[test]
    fn parse_api_error_falls_back_to_status() {
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, "  "),
            "HTTP 502".to_string()
        );
    }

    #[test]
    fn from_status_classifies_taxonomy() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, ""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, ""),
            ApiError::Server(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::Unexpected(_)
        ));
    }
}
