//! Bearer session handling shared by all front ends.
//!
//! The access token lives in an injected [`SessionPersistence`] store with an
//! explicit lifecycle: loaded at startup, saved on login or OAuth capture,
//! cleared on logout and account deletion.

mod callback;

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use callback::{capture_oauth_callback, CapturedCallback, OAuthOutcome};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AuthSession {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
    #[error("Failed to parse stored session: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid OAuth callback: {0}")]
    InvalidCallback(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Process-local session store, useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<AuthSession>>>,
}

impl MemorySessionStore {
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_debug_redacts_token() {
        let session = AuthSession::bearer("secret-access-token");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn session_defaults_token_type() {
        let session: AuthSession = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(session.token_type, "bearer");
    }

    #[test]
    fn memory_store_lifecycle() {
        let store = MemorySessionStore::default();
        assert!(store.load_session().unwrap().is_none());

        store.save_session(&AuthSession::bearer("token")).unwrap();
        let clone = store.clone();
        assert_eq!(
            clone.load_session().unwrap().map(|s| s.access_token),
            Some("token".to_string())
        );

        clone.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }
}
