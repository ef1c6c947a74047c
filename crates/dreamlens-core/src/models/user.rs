//! Account models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated account as returned by `GET /api/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// `local` or an OAuth provider name such as `google`
    pub auth_provider: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.auth_provider == "local"
    }
}

/// Body of `POST /api/auth/register`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Body of `POST /api/auth/login`; `identifier` is an email or a username.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of `DELETE /api/auth/account`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDeleted {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub dreams_deleted: u64,
    #[serde(default)]
    pub orphaned_images_deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            identifier: "dreamer".to_string(),
            password: "hunter22".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("dreamer"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn registration_omits_missing_full_name() {
        let registration = Registration {
            email: "a@example.com".to_string(),
            username: "dreamer".to_string(),
            password: "secret1".to_string(),
            full_name: None,
        };
        let body = serde_json::to_value(&registration).unwrap();
        assert!(body.get("full_name").is_none());
    }
}
