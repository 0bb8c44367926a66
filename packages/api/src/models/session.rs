//! Session, auth-change events and sign-up payloads.

use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Proof of authentication issued by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds after which the access token is no longer accepted.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the service only sent the latter.
    pub fn stamp_expiry(mut self, now: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| now + secs);
        }
        self
    }

    /// Whether the access token has expired at `now` (unix seconds).
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// What caused a session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChange {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// A session-change notification. `session` is `None` once signed out.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthEvent {
    pub change: AuthChange,
    pub session: Option<Session>,
}

/// Everything needed to register an account.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    /// Where the confirmation email sends the user back to.
    pub redirect_to: String,
}

/// Result of a sign-up.
///
/// With email confirmation enabled the service returns only the new user; with
/// auto-confirm it returns a full session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Confirmed(Session),
    PendingConfirmation(User),
}

impl SignUpResponse {
    pub fn user(&self) -> &User {
        match self {
            SignUpResponse::Confirmed(session) => &session.user,
            SignUpResponse::PendingConfirmation(user) => user,
        }
    }
}
