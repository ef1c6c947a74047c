//! Authenticated-or-not gate that drives list activation.

use crate::models::User;

/// A flip of the authenticated flag. User-detail changes are not transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityTransition {
    Authenticated,
    Deauthenticated,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityGate {
    user: Option<User>,
}

impl IdentityGate {
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replaces the current user, reporting a transition only when
    /// `is_authenticated` changes.
    pub fn set_user(&mut self, user: Option<User>) -> Option<IdentityTransition> {
        let was_authenticated = self.is_authenticated();
        self.user = user;
        match (was_authenticated, self.is_authenticated()) {
            (false, true) => Some(IdentityTransition::Authenticated),
            (true, false) => Some(IdentityTransition::Deauthenticated),
            _ => None,
        }
    }

    pub fn sign_out(&mut self) -> Option<IdentityTransition> {
        self.set_user(None)
    }
}
