//! Identity-service seams: the traits the UI is written against, the
//! session-change channel and the Supabase configuration.

mod channel;
mod config;

pub use channel::{SessionChannel, SessionSubscription};
pub use config::SupabaseConfig;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use url::Url;

use crate::error::AuthError;
use crate::models::{Session, SignUpRequest, SignUpResponse};

/// OAuth providers offered on the auth screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Google,
    Apple,
    LinkedIn,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 3] = [
        OAuthProvider::Google,
        OAuthProvider::Apple,
        OAuthProvider::LinkedIn,
    ];

    /// Provider name as the identity service expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Apple => "apple",
            OAuthProvider::LinkedIn => "linkedin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Apple => "Apple",
            OAuthProvider::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            "apple" => Ok(OAuthProvider::Apple),
            "linkedin" => Ok(OAuthProvider::LinkedIn),
            other => Err(format!("Unknown provider: {other}")),
        }
    }
}

/// The identity service as the front end consumes it.
///
/// Implementations own the session. Every method that changes it publishes an
/// [`crate::AuthEvent`] to subscribers.
pub trait IdentityService {
    /// The current session, if any.
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>, AuthError>>;

    /// Subscribe to session changes. Dropping the subscription releases it.
    fn subscribe(&self) -> SessionSubscription;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, AuthError>>;

    fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> impl Future<Output = Result<SignUpResponse, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;

    /// Start an OAuth flow. Returns the provider URL the browser must be sent to;
    /// the provider later redirects back to `redirect_to`.
    fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> impl Future<Output = Result<Url, AuthError>>;
}

/// Profile records keyed by user id.
pub trait ProfileDirectory {
    /// The `role` column of the user's profile. `Ok(None)` when the record has no role.
    fn fetch_role(&self, user_id: &str) -> impl Future<Output = Result<Option<String>, AuthError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        for provider in OAuthProvider::ALL {
            assert_eq!(provider.as_str().parse::<OAuthProvider>(), Ok(provider));
        }
        assert!("github".parse::<OAuthProvider>().is_err());
    }
}
