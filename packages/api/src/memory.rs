//! # In-memory identity service
//!
//! [`MemoryIdentity`] implements [`IdentityService`] and [`ProfileDirectory`] without
//! a network. Accounts, profile roles and the session live behind an
//! `Arc<Mutex<_>>`, so clones observe the same state. Every call is recorded in a
//! call log and any operation can be made to fail with a chosen message, which is
//! what the controller tests rely on.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use url::Url;

use crate::auth::{
    IdentityService, OAuthProvider, ProfileDirectory, SessionChannel, SessionSubscription,
};
use crate::error::AuthError;
use crate::models::{
    AuthChange, Session, SignUpRequest, SignUpResponse, User, UserMetadata,
};

/// A recorded call against [`MemoryIdentity`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    GetSession,
    SignIn { email: String },
    SignUp { email: String },
    SignOut,
    OAuth { provider: OAuthProvider, redirect_to: String },
    FetchRole { user_id: String },
}

/// Operations that can be made to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    GetSession,
    SignIn,
    SignUp,
    SignOut,
    OAuth,
    FetchRole,
}

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    roles: HashMap<String, String>,
    failures: HashMap<Op, String>,
    calls: Vec<Call>,
    next_id: u32,
}

/// In-memory identity service for tests and offline development.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentity {
    state: Arc<Mutex<State>>,
    channel: Arc<SessionChannel>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a confirmed account that can sign in immediately.
    pub fn with_account(self, id: &str, email: &str, password: &str) -> Self {
        let user = User {
            id: id.to_string(),
            email: Some(email.to_string()),
            user_metadata: UserMetadata::default(),
        };
        self.state.lock().unwrap().accounts.insert(
            email.to_string(),
            Account {
                user,
                password: password.to_string(),
            },
        );
        self
    }

    /// Set the `role` column of a user's profile record.
    pub fn with_profile_role(self, user_id: &str, role: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .roles
            .insert(user_id.to_string(), role.to_string());
        self
    }

    /// Make `op` fail with `message` until [`clear_failure`](Self::clear_failure).
    pub fn fail(&self, op: Op, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, message.to_string());
    }

    pub fn clear_failure(&self, op: Op) {
        self.state.lock().unwrap().failures.remove(&op);
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Publish a session change as if it came from another tab or a redirect.
    pub fn emit(&self, change: AuthChange, session: Option<Session>) {
        self.channel.publish(change, session);
    }

    pub fn current_session(&self) -> Option<Session> {
        self.channel.current()
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.subscriber_count()
    }

    /// Build a session for `user` the way the service would issue one.
    pub fn session_for(user: User) -> Session {
        Session {
            access_token: format!("access-{}", user.id),
            token_type: "bearer".to_string(),
            expires_in: Some(3600),
            expires_at: None,
            refresh_token: Some(format!("refresh-{}", user.id)),
            user,
        }
    }

    fn record(&self, call: Call, op: Op) -> Result<(), AuthError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.get(&op) {
            Some(message) => Err(AuthError::service(400, message.clone())),
            None => Ok(()),
        }
    }
}

impl IdentityService for MemoryIdentity {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.record(Call::GetSession, Op::GetSession)?;
        Ok(self.channel.current())
    }

    fn subscribe(&self) -> SessionSubscription {
        self.channel.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.record(
            Call::SignIn {
                email: email.to_string(),
            },
            Op::SignIn,
        )?;
        let user = {
            let state = self.state.lock().unwrap();
            match state.accounts.get(email) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(AuthError::service(400, "Invalid login credentials")),
            }
        };
        let session = Self::session_for(user);
        self.channel.publish(AuthChange::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, AuthError> {
        self.record(
            Call::SignUp {
                email: request.email.clone(),
            },
            Op::SignUp,
        )?;
        let mut state = self.state.lock().unwrap();
        if state.accounts.contains_key(&request.email) {
            return Err(AuthError::service(422, "User already registered"));
        }
        state.next_id += 1;
        let user = User {
            id: format!("memory-{}", state.next_id),
            email: Some(request.email.clone()),
            user_metadata: UserMetadata {
                full_name: Some(request.full_name.clone()),
                raw_role: Some(request.role.as_str().to_string()),
            },
        };
        state.accounts.insert(
            request.email.clone(),
            Account {
                user: user.clone(),
                password: request.password.clone(),
            },
        );
        // Accounts need email confirmation before a session is issued.
        Ok(SignUpResponse::PendingConfirmation(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.record(Call::SignOut, Op::SignOut);
        self.channel.publish(AuthChange::SignedOut, None);
        result
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<Url, AuthError> {
        self.record(
            Call::OAuth {
                provider,
                redirect_to: redirect_to.to_string(),
            },
            Op::OAuth,
        )?;
        let mut url = Url::parse("https://identity.invalid/authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url)
    }
}

impl ProfileDirectory for MemoryIdentity {
    async fn fetch_role(&self, user_id: &str) -> Result<Option<String>, AuthError> {
        self.record(
            Call::FetchRole {
                user_id: user_id.to_string(),
            },
            Op::FetchRole,
        )?;
        Ok(self.state.lock().unwrap().roles.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sign_up_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "secret123".to_string(),
            full_name: "Ada".to_string(),
            role: Role::JobSeeker,
            redirect_to: "http://localhost:8080/".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_publishes_session() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        let mut sub = identity.subscribe();

        let session = identity.sign_in_with_password("a@b.com", "pw").await.unwrap();
        assert_eq!(session.user.id, "u1");

        let event = sub.next().await.unwrap();
        assert_eq!(event.change, AuthChange::SignedIn);
        assert_eq!(identity.get_session().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        let err = identity.sign_in_with_password("a@b.com", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(identity.current_session().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_then_duplicate() {
        let identity = MemoryIdentity::new();
        let response = identity.sign_up(&sign_up_request("new@b.com")).await.unwrap();
        let user = response.user();
        assert_eq!(user.user_metadata.role(), Some(Role::JobSeeker));
        assert!(identity.current_session().is_none());

        let err = identity.sign_up(&sign_up_request("new@b.com")).await.unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
    }

    #[tokio::test]
    async fn test_injected_failure_and_call_log() {
        let identity = MemoryIdentity::new().with_profile_role("u1", "employer");
        assert_eq!(identity.fetch_role("u1").await.unwrap().as_deref(), Some("employer"));

        identity.fail(Op::FetchRole, "boom");
        assert!(identity.fetch_role("u1").await.is_err());
        identity.clear_failure(Op::FetchRole);
        assert!(identity.fetch_role("u2").await.unwrap().is_none());

        assert_eq!(
            identity.calls(),
            vec![
                Call::FetchRole { user_id: "u1".to_string() },
                Call::FetchRole { user_id: "u1".to_string() },
                Call::FetchRole { user_id: "u2".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_on_failure() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        identity.sign_in_with_password("a@b.com", "pw").await.unwrap();

        identity.fail(Op::SignOut, "network down");
        assert!(identity.sign_out().await.is_err());
        assert!(identity.current_session().is_none());
    }
}
