//! # Supabase client: REST implementation of the identity seams
//!
//! [`SupabaseClient`] implements [`IdentityService`] against Supabase Auth (GoTrue)
//! and [`ProfileDirectory`] against PostgREST, using `reqwest` so the same code runs
//! natively and in the browser.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | sign in | `POST /auth/v1/token?grant_type=password` |
//! | refresh | `POST /auth/v1/token?grant_type=refresh_token` |
//! | sign up | `POST /auth/v1/signup?redirect_to=…` (name and role under `data`) |
//! | sign out | `POST /auth/v1/logout` with the user's bearer token |
//! | OAuth | browser redirect to `/auth/v1/authorize?provider=…&redirect_to=…` |
//! | OAuth return | `GET /auth/v1/user` with the token from the URL fragment |
//! | role lookup | `GET /rest/v1/<profiles_table>?id=eq.<id>&select=role`, single object |
//!
//! ## Session ownership
//!
//! The client is the only owner of the session. It is restored lazily from the
//! [`KeyValueStore`] on the first [`get_session`](IdentityService::get_session),
//! written back on every sign-in or refresh, and removed on sign-out. Every change
//! is published on the internal [`SessionChannel`].

mod wire;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use store::{KeyValueStore, SESSION_KEY};
use tokio::sync::OnceCell;
use url::Url;

use crate::auth::{
    IdentityService, OAuthProvider, ProfileDirectory, SessionChannel, SessionSubscription,
    SupabaseConfig,
};
use crate::error::{AuthError, ConfigError};
use crate::models::{AuthChange, Session, SignUpRequest, SignUpResponse, User};
use wire::{
    now_secs, service_error, PasswordGrant, ProfileRow, RedirectTokens, RefreshGrant, SignUpBody,
    SignUpMetadata,
};

/// Supabase-backed identity service. Cheap to clone; clones share the session.
pub struct SupabaseClient<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    config: SupabaseConfig,
    base: Url,
    http: reqwest::Client,
    store: S,
    channel: SessionChannel,
    /// Set once the stored session has been loaded (or superseded by a sign-in).
    restored: OnceCell<()>,
}

impl<S> Clone for SupabaseClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> PartialEq for SupabaseClient<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: KeyValueStore> SupabaseClient<S> {
    /// Create a client for the given project, persisting sessions in `store`.
    pub fn new(config: SupabaseConfig, store: S) -> Result<Self, ConfigError> {
        let base = config.base_url()?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                base,
                http: reqwest::Client::new(),
                store,
                channel: SessionChannel::default(),
                restored: OnceCell::new(),
            }),
        })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.inner.config
    }

    /// Number of live session subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.channel.subscriber_count()
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        Ok(self.inner.base.join(path)?)
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let anon_key = &self.inner.config.anon_key;
        self.inner
            .http
            .request(method, url)
            .header("apikey", anon_key)
            .bearer_auth(token.unwrap_or(anon_key))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AuthError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(request: RequestBuilder) -> Result<(), AuthError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(service_error(status.as_u16(), &body));
        }
        Ok(())
    }

    async fn persist(&self, session: &Session, change: AuthChange) {
        match serde_json::to_string(session) {
            Ok(json) => self.inner.store.set(SESSION_KEY, &json).await,
            Err(e) => tracing::warn!("Failed to serialise session: {}", e),
        }
        self.inner.channel.publish(change, Some(session.clone()));
    }

    async fn forget(&self) {
        self.inner.store.remove(SESSION_KEY).await;
        self.inner.channel.publish(AuthChange::SignedOut, None);
    }

    /// Load the persisted session into the channel the first time it is needed.
    ///
    /// Concurrent callers wait for the same load. Only a usable session is
    /// published: an expired one is refreshed first, or dropped if that fails.
    async fn restore(&self) -> Option<Session> {
        self.inner
            .restored
            .get_or_init(|| async { self.load_stored().await })
            .await;
        self.inner.channel.current()
    }

    fn mark_restored(&self) {
        // Fails only when already set or a load is in flight; both are fine.
        let _ = self.inner.restored.set(());
    }

    async fn load_stored(&self) {
        if self.inner.channel.current().is_some() {
            return;
        }
        let Some(json) = self.inner.store.get(SESSION_KEY).await else {
            return;
        };
        let session = match serde_json::from_str::<Session>(&json) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable stored session: {}", e);
                self.inner.store.remove(SESSION_KEY).await;
                return;
            }
        };

        if !session.is_expired(now_secs()) {
            self.inner
                .channel
                .publish(AuthChange::InitialSession, Some(session));
            return;
        }
        let Some(refresh_token) = session.refresh_token.as_deref() else {
            tracing::info!(user_id = %session.user.id, "stored session expired");
            self.forget().await;
            return;
        };
        if let Err(e) = self.refresh_with(refresh_token).await {
            tracing::warn!("Stored session could not be refreshed: {}", e);
            self.forget().await;
        }
    }

    /// Exchange the current refresh token for a new session.
    pub async fn refresh_session(&self) -> Result<Session, AuthError> {
        let refresh_token = self
            .inner
            .channel
            .current()
            .and_then(|s| s.refresh_token)
            .ok_or(AuthError::MissingSession)?;
        self.refresh_with(&refresh_token).await
    }

    async fn refresh_with(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let url = self.endpoint("auth/v1/token?grant_type=refresh_token")?;
        let request = self
            .request(Method::POST, url, None)
            .json(&RefreshGrant { refresh_token });
        let session = Self::send::<Session>(request).await?.stamp_expiry(now_secs());
        self.persist(&session, AuthChange::TokenRefreshed).await;
        Ok(session)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.endpoint("auth/v1/user")?;
        Self::send(self.request(Method::GET, url, Some(access_token))).await
    }

    /// Complete an OAuth or email-link round-trip from the page URL.
    ///
    /// Returns `Ok(None)` when the URL carries no tokens.
    pub async fn session_from_redirect(&self, location: &str) -> Result<Option<Session>, AuthError> {
        let url = Url::parse(location)?;
        let Some(fragment) = url.fragment() else {
            return Ok(None);
        };
        let tokens = RedirectTokens::from_fragment(fragment);
        if let Some(description) = tokens.error_description {
            return Err(AuthError::service(400, description));
        }
        let Some(access_token) = tokens.access_token else {
            return Ok(None);
        };

        let user = self.fetch_user(&access_token).await?;
        let session = Session {
            access_token,
            token_type: tokens.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_in: tokens.expires_in,
            expires_at: tokens.expires_at,
            refresh_token: tokens.refresh_token,
            user,
        }
        .stamp_expiry(now_secs());

        self.mark_restored();
        self.persist(&session, AuthChange::SignedIn).await;
        tracing::info!(user_id = %session.user.id, "session restored from redirect");
        Ok(Some(session))
    }

    async fn revoke(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("auth/v1/logout")?;
        match Self::send_empty(self.request(Method::POST, url, Some(access_token))).await {
            // The token is already gone on the server side.
            Err(AuthError::Service { status: 401 | 403 | 404, .. }) => Ok(()),
            other => other,
        }
    }
}

impl<S: KeyValueStore> IdentityService for SupabaseClient<S> {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.restore().await else {
            return Ok(None);
        };
        if !session.is_expired(now_secs()) {
            return Ok(Some(session));
        }
        if session.refresh_token.is_none() {
            self.forget().await;
            return Ok(None);
        }
        match self.refresh_session().await {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Session refresh failed: {}", e);
                self.forget().await;
                Ok(None)
            }
        }
    }

    fn subscribe(&self) -> SessionSubscription {
        self.inner.channel.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self.endpoint("auth/v1/token?grant_type=password")?;
        let request = self
            .request(Method::POST, url, None)
            .json(&PasswordGrant { email, password });
        let session = Self::send::<Session>(request).await?.stamp_expiry(now_secs());

        self.mark_restored();
        self.persist(&session, AuthChange::SignedIn).await;
        tracing::info!(user_id = %session.user.id, "signed in with password");
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, AuthError> {
        let mut url = self.endpoint("auth/v1/signup")?;
        url.query_pairs_mut()
            .append_pair("redirect_to", &request.redirect_to);
        let body = SignUpBody {
            email: &request.email,
            password: &request.password,
            data: SignUpMetadata {
                full_name: &request.full_name,
                role: request.role,
            },
        };
        let response: SignUpResponse = Self::send(self.request(Method::POST, url, None).json(&body)).await?;

        if let SignUpResponse::Confirmed(session) = &response {
            let session = session.clone().stamp_expiry(now_secs());
            self.mark_restored();
            self.persist(&session, AuthChange::SignedIn).await;
        }
        tracing::info!(user_id = %response.user().id, role = %request.role, "account created");
        Ok(response)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let result = match self.restore().await {
            Some(session) => self.revoke(&session.access_token).await,
            None => Ok(()),
        };
        // The local session goes away even if the server could not be reached.
        self.forget().await;
        result
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<Url, AuthError> {
        let mut url = self.endpoint("auth/v1/authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        tracing::info!(%provider, "starting OAuth sign-in");
        Ok(url)
    }
}

impl<S: KeyValueStore> ProfileDirectory for SupabaseClient<S> {
    async fn fetch_role(&self, user_id: &str) -> Result<Option<String>, AuthError> {
        let mut url = self.endpoint(&format!("rest/v1/{}", self.inner.config.profiles_table))?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{user_id}"))
            .append_pair("select", "role");
        let token = self.inner.channel.current().map(|s| s.access_token);
        let request = self
            .request(Method::GET, url, token.as_deref())
            .header("Accept", "application/vnd.pgrst.object+json");
        let row: ProfileRow = Self::send(request).await?;
        Ok(row.role.filter(|role| !role.is_empty()))
    }
}
