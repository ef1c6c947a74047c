//! OAuth redirect capture.
//!
//! The backend finishes a Google sign-in by redirecting to the front end with
//! `?token=<jwt>&login=success` (or `?error=<reason>`). The token must leave
//! the URL as soon as it is read, so capture always hands back the URL
//! without its query and fragment.

use std::fmt;

use url::Url;

use super::{AuthError, AuthResult, AuthSession};

#[derive(Clone, PartialEq, Eq)]
pub enum OAuthOutcome {
    /// Redirect carried a fresh access token
    SignedIn(AuthSession),
    /// Provider or backend reported a failure
    Failed(String),
    /// Ordinary URL without OAuth parameters
    Absent,
}

impl fmt::Debug for OAuthOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignedIn(session) => formatter.debug_tuple("SignedIn").field(session).finish(),
            Self::Failed(reason) => formatter.debug_tuple("Failed").field(reason).finish(),
            Self::Absent => formatter.write_str("Absent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCallback {
    pub outcome: OAuthOutcome,
    /// URL to show from now on; query stripped whenever OAuth parameters were present
    pub clean_url: String,
}

pub fn capture_oauth_callback(raw_url: &str) -> AuthResult<CapturedCallback> {
    let mut url = Url::parse(raw_url.trim())
        .map_err(|error| AuthError::InvalidCallback(error.to_string()))?;

    let mut token = None;
    let mut login = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "token" => token = Some(value.into_owned()),
            "login" => login = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if token.is_none() && error.is_none() {
        return Ok(CapturedCallback {
            outcome: OAuthOutcome::Absent,
            clean_url: url.to_string(),
        });
    }

    url.set_query(None);
    url.set_fragment(None);
    let clean_url = url.to_string();

    let outcome = match (token, login.as_deref(), error) {
        (Some(token), Some("success"), _) if !token.trim().is_empty() => {
            OAuthOutcome::SignedIn(AuthSession::bearer(token.trim()))
        }
        (_, _, Some(reason)) => OAuthOutcome::Failed(reason),
        (Some(_), _, None) => {
            return Err(AuthError::InvalidCallback(
                "callback carried a token without login=success".to_string(),
            ));
        }
        (None, _, None) => OAuthOutcome::Absent,
    };

    Ok(CapturedCallback { outcome, clean_url })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_token_and_strips_query() {
        let captured =
            capture_oauth_callback("http://localhost:5173/?token=abc.def&login=success").unwrap();
        assert_eq!(
            captured.outcome,
            OAuthOutcome::SignedIn(AuthSession::bearer("abc.def"))
        );
        assert_eq!(captured.clean_url, "http://localhost:5173/");
    }

    #[test]
    fn reports_provider_failure() {
        let captured =
            capture_oauth_callback("http://localhost:5173/home?error=google_login_failed#top")
                .unwrap();
        assert_eq!(
            captured.outcome,
            OAuthOutcome::Failed("google_login_failed".to_string())
        );
        assert_eq!(captured.clean_url, "http://localhost:5173/home");
    }

    #[test]
    fn leaves_plain_urls_untouched() {
        let captured = capture_oauth_callback("http://localhost:5173/about?tab=2").unwrap();
        assert_eq!(captured.outcome, OAuthOutcome::Absent);
        assert_eq!(captured.clean_url, "http://localhost:5173/about?tab=2");
    }

    #[test]
    fn rejects_token_without_success_flag() {
        let error = capture_oauth_callback("http://localhost:5173/?token=abc").unwrap_err();
        assert!(matches!(error, AuthError::InvalidCallback(_)));
    }

    #[test]
    fn outcome_debug_redacts_token() {
        let captured =
            capture_oauth_callback("http://localhost:5173/?token=top-secret&login=success")
                .unwrap();
        assert!(!format!("{captured:?}").contains("top-secret"));
    }
}
