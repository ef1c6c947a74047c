//! Account endpoints under `/api/auth`.

use serde::Deserialize;

use super::{send_json, ApiError, ApiResult, DreamlensClient};
use crate::auth::{AuthSession, CapturedCallback, OAuthOutcome, SessionPersistence};
use crate::models::{AccountDeleted, Credentials, Registration, User};

const MIN_USERNAME_CHARS: usize = 3;
const MAX_FIELD_CHARS: usize = 100;
const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

impl From<TokenResponse> for AuthSession {
    fn from(value: TokenResponse) -> Self {
        let mut session = Self::bearer(value.access_token);
        if let Some(token_type) = value.token_type {
            session.token_type = token_type;
        }
        session
    }
}

impl<S: SessionPersistence> DreamlensClient<S> {
    pub async fn register(&self, registration: &Registration) -> ApiResult<User> {
        validate_registration(registration)?;
        let request = self
            .client
            .post(self.url("/api/auth/register"))
            .json(registration);
        let user: User = send_json(request).await?;
        tracing::info!("Registered account '{}'", user.username);
        Ok(user)
    }

    /// Exchanges credentials for a bearer token and stores it.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthSession> {
        if credentials.identifier.trim().is_empty() {
            return Err(ApiError::Validation(
                "Email or username is required".to_string(),
            ));
        }
        if credentials.password.is_empty() {
            return Err(ApiError::Validation("Password is required".to_string()));
        }

        let request = self
            .client
            .post(self.url("/api/auth/login"))
            .json(credentials);
        let token: TokenResponse = send_json(request).await?;
        let session = AuthSession::from(token);
        self.store.save_session(&session)?;
        tracing::info!("Signed in as '{}'", credentials.identifier.trim());
        Ok(session)
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        let request = self.authorized(self.client.get(self.url("/api/auth/me")))?;
        send_json(request).await
    }

    /// Loads the account behind a stored token.
    ///
    /// A token the backend rejects is cleared and `Ok(None)` is returned.
    pub async fn restore_user(&self) -> ApiResult<Option<User>> {
        if self.store.load_session()?.is_none() {
            return Ok(None);
        }

        match self.current_user().await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::Unauthorized(message)) => {
                tracing::warn!("Stored session rejected, signing out: {}", message);
                self.store.clear_session()?;
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Stores the token carried by an OAuth redirect and verifies it.
    ///
    /// Returns `Ok(None)` when the URL carried no OAuth parameters. A token the
    /// backend refuses is removed again before the error is returned.
    pub async fn accept_oauth_callback(
        &self,
        captured: &CapturedCallback,
    ) -> ApiResult<Option<User>> {
        match &captured.outcome {
            OAuthOutcome::Absent => Ok(None),
            OAuthOutcome::Failed(reason) => Err(ApiError::Unauthorized(format!(
                "OAuth sign-in failed: {reason}"
            ))),
            OAuthOutcome::SignedIn(session) => {
                self.store.save_session(session)?;
                match self.current_user().await {
                    Ok(user) => {
                        tracing::info!("Signed in with OAuth as '{}'", user.username);
                        Ok(Some(user))
                    }
                    Err(error) => {
                        self.store.clear_session()?;
                        Err(error)
                    }
                }
            }
        }
    }

    /// Forgets the stored token. The backend keeps no server-side session.
    pub fn logout(&self) -> ApiResult<()> {
        self.store.clear_session()?;
        Ok(())
    }

    /// Permanently deletes the account and everything it owns.
    ///
    /// `password` is required for local accounts and ignored for OAuth ones.
    pub async fn delete_account(&self, password: Option<&str>) -> ApiResult<AccountDeleted> {
        let request = self.authorized(
            self.client
                .delete(self.url("/api/auth/account"))
                .json(&serde_json::json!({ "password": password })),
        )?;
        let deleted: AccountDeleted = send_json(request).await?;
        self.store.clear_session()?;
        tracing::info!(
            "Deleted account ({} dreams removed)",
            deleted.dreams_deleted
        );
        Ok(deleted)
    }
}

fn validate_registration(registration: &Registration) -> ApiResult<()> {
    let email = registration.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    let username_len = registration.username.trim().chars().count();
    if !(MIN_USERNAME_CHARS..=MAX_FIELD_CHARS).contains(&username_len) {
        return Err(ApiError::Validation(format!(
            "Username must be {MIN_USERNAME_CHARS}-{MAX_FIELD_CHARS} characters"
        )));
    }
    let password_len = registration.password.chars().count();
    if !(MIN_PASSWORD_CHARS..=MAX_FIELD_CHARS).contains(&password_len) {
        return Err(ApiError::Validation(format!(
            "Password must be {MIN_PASSWORD_CHARS}-{MAX_FIELD_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, username: &str, password: &str) -> Registration {
        Registration {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            full_name: None,
        }
    }

    #[test]
    fn validate_registration_enforces_field_lengths() {
        assert!(validate_registration(&registration("a@b.io", "dreamer", "secret1")).is_ok());
        assert!(
            validate_registration(&registration("not-an-email", "dreamer", "secret1")).is_err()
        );
        assert!(validate_registration(&registration("a@b.io", "ab", "secret1")).is_err());
        assert!(validate_registration(&registration("a@b.io", "dreamer", "12345")).is_err());
    }

    #[test]
    fn token_response_keeps_reported_type() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"jwt","token_type":"Bearer"}"#).unwrap();
        let session = AuthSession::from(token);
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.token_type, "Bearer");
    }
}
