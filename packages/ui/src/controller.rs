//! # Auth screen controller
//!
//! The state and operations behind the sliding sign-in / sign-up screen, kept free
//! of any rendering so they can be driven directly from tests.
//!
//! ## State
//!
//! [`AuthScreen`] holds the [`AuthMode`], both forms' field values, the selected
//! [`Role`] and a `loading` flag. The mode changes only through [`AuthScreen::toggle`],
//! [`AuthScreen::show`] or a finished operation that asks for it.
//!
//! ## Submitting
//!
//! A submit is split in two so the UI never holds state across an await:
//!
//! 1. `begin_*` validates locally and sets `loading`, returning a [`Submission`].
//!    A submit while `loading` is [`Submission::Busy`]; a sign-up without a role is
//!    [`Submission::Rejected`] and never reaches the identity service.
//! 2. [`sign_in`], [`sign_up`] or [`oauth`] talk to the identity service and return an
//!    [`Outcome`] (toast, navigation, mode change) that [`AuthScreen::finish`] and the
//!    caller apply.
//!
//! ## OAuth and the pending role
//!
//! OAuth leaves the page, so a chosen role is written to durable storage under
//! [`PENDING_ROLE_KEY`] before the provider URL is requested.
//! [`restore_pending_role`] reads it back (and clears it) on the next page load.

use std::fmt;

use api::{AuthError, IdentityService, OAuthProvider, ProfileDirectory, Role, SignUpRequest};
use store::{KeyValueStore, PENDING_ROLE_KEY};

use crate::destination::Destination;
use crate::toast::Toast;

pub const SIGNED_IN: &str = "Signed in";
pub const SIGN_UP_CONFIRMATION: &str = "Account created. Check your email to confirm";
pub const SELECT_ROLE: &str = "Please select a role";

/// Which form is in front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "signin",
            AuthMode::SignUp => "signup",
        }
    }

    /// Mode from a `?mode=` query value. Anything unrecognised is sign-in.
    pub fn from_query(value: &str) -> Self {
        match value {
            "signup" => AuthMode::SignUp,
            _ => AuthMode::SignIn,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignInFields {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignUpFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Credentials captured by [`AuthScreen::begin_sign_in`].
#[derive(Clone, Debug, PartialEq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Result of starting a submit.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission<T> {
    Ready(T),
    /// Another submit is still in flight.
    Busy,
    /// Local validation failed; show the toast and do nothing else.
    Rejected(Toast),
}

/// What the UI should do once an operation completes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    pub toast: Option<Toast>,
    pub navigate: Option<Destination>,
    pub mode: Option<AuthMode>,
}

impl Outcome {
    fn failure(err: &AuthError, fallback: &str) -> Self {
        tracing::warn!("{}: {}", fallback, err);
        Self {
            toast: Some(Toast::error(
                err.user_message().unwrap_or_else(|| fallback.to_string()),
            )),
            ..Default::default()
        }
    }
}

/// State of the auth screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthScreen {
    mode: AuthMode,
    pub sign_in: SignInFields,
    pub sign_up: SignUpFields,
    loading: bool,
}

impl AuthScreen {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Bring `mode` to the front (the "Sign In" / "Sign Up" panel buttons).
    pub fn show(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    pub fn select_role(&mut self, role: Role) {
        self.sign_up.role = Some(role);
    }

    pub fn begin_sign_in(&mut self) -> Submission<SignInRequest> {
        if self.loading {
            return Submission::Busy;
        }
        self.loading = true;
        Submission::Ready(SignInRequest {
            email: self.sign_in.email.clone(),
            password: self.sign_in.password.clone(),
        })
    }

    /// Start a sign-up. `redirect_to` is where the confirmation link returns.
    pub fn begin_sign_up(&mut self, redirect_to: &str) -> Submission<SignUpRequest> {
        if self.loading {
            return Submission::Busy;
        }
        let Some(role) = self.sign_up.role else {
            return Submission::Rejected(Toast::error(SELECT_ROLE));
        };
        self.loading = true;
        Submission::Ready(SignUpRequest {
            email: self.sign_up.email.clone(),
            password: self.sign_up.password.clone(),
            full_name: self.sign_up.name.clone(),
            role,
            redirect_to: redirect_to.to_string(),
        })
    }

    /// Apply a completed operation.
    pub fn finish(&mut self, outcome: &Outcome) {
        self.loading = false;
        if let Some(mode) = outcome.mode {
            self.mode = mode;
        }
    }
}

/// Password sign-in followed by a role lookup to pick the landing page.
///
/// A missing profile, an empty role or a failed lookup lands on the home route.
pub async fn sign_in<I, P>(identity: &I, profiles: &P, request: SignInRequest) -> Outcome
where
    I: IdentityService,
    P: ProfileDirectory,
{
    let session = match identity
        .sign_in_with_password(&request.email, &request.password)
        .await
    {
        Ok(session) => session,
        Err(e) => return Outcome::failure(&e, "Failed to sign in"),
    };

    let destination = match profiles.fetch_role(&session.user.id).await {
        Ok(Some(role)) if !role.is_empty() => Destination::dashboard_for(Some(&role)),
        Ok(_) => Destination::Home,
        Err(e) => {
            tracing::warn!(user_id = %session.user.id, "Profile lookup failed: {}", e);
            Destination::Home
        }
    };

    Outcome {
        toast: Some(Toast::success(SIGNED_IN)),
        navigate: Some(destination),
        mode: None,
    }
}

/// Register an account. Success returns to sign-in mode; the account is usable
/// once the emailed confirmation link has been followed.
pub async fn sign_up<I: IdentityService>(identity: &I, request: SignUpRequest) -> Outcome {
    match identity.sign_up(&request).await {
        Ok(_) => Outcome {
            toast: Some(Toast::success(SIGN_UP_CONFIRMATION)),
            navigate: None,
            mode: Some(AuthMode::SignIn),
        },
        Err(e) => Outcome::failure(&e, "Failed to sign up"),
    }
}

/// Start an OAuth sign-in, remembering `role` across the redirect.
pub async fn oauth<I, S>(
    identity: &I,
    storage: &S,
    provider: OAuthProvider,
    role: Option<Role>,
    redirect_to: &str,
) -> Outcome
where
    I: IdentityService,
    S: KeyValueStore,
{
    if let Some(role) = role {
        storage.set(PENDING_ROLE_KEY, role.as_str()).await;
    }
    match identity.sign_in_with_oauth(provider, redirect_to).await {
        Ok(url) => Outcome {
            navigate: Some(Destination::External(url)),
            ..Default::default()
        },
        Err(e) => Outcome::failure(&e, &format!("OAuth failed ({provider})")),
    }
}

/// Read and clear the role stored before an OAuth redirect.
pub async fn restore_pending_role<S: KeyValueStore>(storage: &S) -> Option<Role> {
    let raw = storage.take(PENDING_ROLE_KEY).await?;
    match raw.parse() {
        Ok(role) => Some(role),
        Err(e) => {
            tracing::warn!("Ignoring pending role: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::memory::{Call, Op};
    use api::MemoryIdentity;
    use store::MemoryStore;

    const REDIRECT: &str = "http://localhost:8080/";

    fn signed_up_screen(role: Option<Role>) -> AuthScreen {
        let mut screen = AuthScreen::new(AuthMode::SignUp);
        screen.sign_up = SignUpFields {
            name: "Ada".to_string(),
            email: "new@b.com".to_string(),
            password: "secret123".to_string(),
            role,
        };
        screen
    }

    async fn submit_sign_in(
        screen: &mut AuthScreen,
        identity: &MemoryIdentity,
    ) -> Outcome {
        let Submission::Ready(request) = screen.begin_sign_in() else {
            panic!("sign-in not ready");
        };
        let outcome = sign_in(identity, identity, request).await;
        screen.finish(&outcome);
        outcome
    }

    #[test]
    fn test_toggle_parity() {
        for n in 0..10 {
            let mut screen = AuthScreen::new(AuthMode::SignIn);
            for _ in 0..n {
                screen.toggle();
            }
            let expected = if n % 2 == 0 { AuthMode::SignIn } else { AuthMode::SignUp };
            assert_eq!(screen.mode(), expected, "after {n} toggles");
        }
    }

    #[test]
    fn test_default_mode_and_show() {
        let mut screen = AuthScreen::default();
        assert_eq!(screen.mode(), AuthMode::SignIn);
        screen.show(AuthMode::SignUp);
        screen.show(AuthMode::SignUp);
        assert_eq!(screen.mode(), AuthMode::SignUp);
        assert_eq!(AuthMode::from_query("signup"), AuthMode::SignUp);
        assert_eq!(AuthMode::from_query("bogus"), AuthMode::SignIn);
        assert_eq!(AuthMode::SignUp.to_string(), "signup");
    }

    #[tokio::test]
    async fn test_sign_up_without_role_never_calls_service() {
        let identity = MemoryIdentity::new();
        let mut screen = signed_up_screen(None);

        let submission = screen.begin_sign_up(REDIRECT);
        assert_eq!(submission, Submission::Rejected(Toast::error(SELECT_ROLE)));
        assert!(!screen.loading());
        assert_eq!(screen.mode(), AuthMode::SignUp);
        assert!(identity.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_routes_by_profile_role() {
        let identity = MemoryIdentity::new()
            .with_account("u1", "a@b.com", "pw")
            .with_profile_role("u1", "employer");
        let mut screen = AuthScreen::default();
        screen.sign_in.email = "a@b.com".to_string();
        screen.sign_in.password = "pw".to_string();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert_eq!(outcome.navigate, Some(Destination::EmployerDashboard));
        assert_eq!(outcome.navigate.unwrap().path(), "/employer-dashboard");
        assert_eq!(outcome.toast, Some(Toast::success(SIGNED_IN)));
        assert!(!screen.loading());
        assert_eq!(
            identity.calls(),
            vec![
                Call::SignIn { email: "a@b.com".to_string() },
                Call::FetchRole { user_id: "u1".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_sign_in_job_seeker_dashboard() {
        let identity = MemoryIdentity::new()
            .with_account("u2", "seeker@b.com", "pw")
            .with_profile_role("u2", "job_seeker");
        let mut screen = AuthScreen::default();
        screen.sign_in.email = "seeker@b.com".to_string();
        screen.sign_in.password = "pw".to_string();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert_eq!(outcome.navigate, Some(Destination::SeekerDashboard));
    }

    #[tokio::test]
    async fn test_sign_in_lookup_failure_goes_home() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        identity.fail(Op::FetchRole, "JSON object requested, multiple (or no) rows returned");
        let mut screen = AuthScreen::default();
        screen.sign_in.email = "a@b.com".to_string();
        screen.sign_in.password = "pw".to_string();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert_eq!(outcome.navigate, Some(Destination::Home));
        assert_eq!(outcome.navigate.unwrap().path(), "/");
    }

    #[tokio::test]
    async fn test_sign_in_without_profile_role_goes_home() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        let mut screen = AuthScreen::default();
        screen.sign_in.email = "a@b.com".to_string();
        screen.sign_in.password = "pw".to_string();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert_eq!(outcome.navigate, Some(Destination::Home));
    }

    #[tokio::test]
    async fn test_sign_in_empty_profile_role_goes_home() {
        let identity = MemoryIdentity::new()
            .with_account("u1", "a@b.com", "pw")
            .with_profile_role("u1", "");
        let mut screen = AuthScreen::default();
        screen.sign_in.email = "a@b.com".to_string();
        screen.sign_in.password = "pw".to_string();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert_eq!(outcome.navigate, Some(Destination::Home));
    }

    #[tokio::test]
    async fn test_sign_in_failure_shows_service_message() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        let mut screen = AuthScreen::default();
        screen.sign_in.email = "a@b.com".to_string();
        screen.sign_in.password = "wrong".to_string();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert!(outcome.navigate.is_none());
        assert_eq!(outcome.toast, Some(Toast::error("Invalid login credentials")));
        assert!(!screen.loading());
    }

    #[tokio::test]
    async fn test_sign_in_blank_error_uses_fallback() {
        let identity = MemoryIdentity::new().with_account("u1", "a@b.com", "pw");
        identity.fail(Op::SignIn, "");
        let mut screen = AuthScreen::default();

        let outcome = submit_sign_in(&mut screen, &identity).await;
        assert_eq!(outcome.toast, Some(Toast::error("Failed to sign in")));
    }

    #[test]
    fn test_submit_while_loading_is_busy() {
        let mut screen = signed_up_screen(Some(Role::Employer));
        assert!(matches!(screen.begin_sign_in(), Submission::Ready(_)));
        assert!(screen.loading());
        assert_eq!(screen.begin_sign_in(), Submission::Busy);
        assert_eq!(screen.begin_sign_up(REDIRECT), Submission::Busy);

        screen.finish(&Outcome::default());
        assert!(!screen.loading());
        assert!(matches!(screen.begin_sign_up(REDIRECT), Submission::Ready(_)));
    }

    #[tokio::test]
    async fn test_sign_up_success_switches_to_sign_in_once() {
        let identity = MemoryIdentity::new();
        let mut screen = signed_up_screen(Some(Role::JobSeeker));

        let Submission::Ready(request) = screen.begin_sign_up(REDIRECT) else {
            panic!("sign-up not ready");
        };
        assert_eq!(request.role, Role::JobSeeker);
        assert_eq!(request.full_name, "Ada");
        assert_eq!(request.redirect_to, REDIRECT);

        let outcome = sign_up(&identity, request).await;
        assert_eq!(outcome.mode, Some(AuthMode::SignIn));
        assert_eq!(outcome.toast, Some(Toast::success(SIGN_UP_CONFIRMATION)));
        assert!(outcome.navigate.is_none());

        screen.finish(&outcome);
        assert_eq!(screen.mode(), AuthMode::SignIn);
        // Not signed in until the email is confirmed
        assert!(identity.current_session().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_failure_keeps_mode() {
        let identity = MemoryIdentity::new();
        identity.fail(Op::SignUp, "Password should be at least 6 characters");
        let mut screen = signed_up_screen(Some(Role::Employer));

        let Submission::Ready(request) = screen.begin_sign_up(REDIRECT) else {
            panic!("sign-up not ready");
        };
        let outcome = sign_up(&identity, request).await;
        screen.finish(&outcome);

        assert_eq!(screen.mode(), AuthMode::SignUp);
        assert_eq!(
            outcome.toast,
            Some(Toast::error("Password should be at least 6 characters"))
        );
    }

    #[tokio::test]
    async fn test_oauth_persists_role_before_service_call() {
        let identity = MemoryIdentity::new();
        let storage = MemoryStore::new();
        // A failing OAuth start proves the role was written before the call.
        identity.fail(Op::OAuth, "");

        let outcome = oauth(
            &identity,
            &storage,
            OAuthProvider::Google,
            Some(Role::JobSeeker),
            REDIRECT,
        )
        .await;
        assert_eq!(outcome.toast, Some(Toast::error("OAuth failed (google)")));
        assert!(outcome.navigate.is_none());
        assert_eq!(storage.get(PENDING_ROLE_KEY).await.as_deref(), Some("job_seeker"));
    }

    #[tokio::test]
    async fn test_oauth_success_redirects_externally() {
        let identity = MemoryIdentity::new();
        let storage = MemoryStore::new();

        let outcome = oauth(&identity, &storage, OAuthProvider::Apple, None, REDIRECT).await;
        match outcome.navigate {
            Some(Destination::External(url)) => {
                assert!(url.as_str().contains("provider=apple"));
            }
            other => panic!("expected external redirect, got {other:?}"),
        }
        // No role selected: nothing stored
        assert!(storage.is_empty());
        assert_eq!(
            identity.calls(),
            vec![Call::OAuth {
                provider: OAuthProvider::Apple,
                redirect_to: REDIRECT.to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_restore_pending_role_clears_key() {
        let storage = MemoryStore::new();
        storage.set(PENDING_ROLE_KEY, "job_seeker").await;

        let mut screen = AuthScreen::default();
        if let Some(role) = restore_pending_role(&storage).await {
            screen.select_role(role);
        }
        assert_eq!(screen.sign_up.role, Some(Role::JobSeeker));
        assert!(storage.get(PENDING_ROLE_KEY).await.is_none());

        // Second load finds nothing
        assert!(restore_pending_role(&storage).await.is_none());
    }

    #[tokio::test]
    async fn test_restore_pending_role_ignores_garbage() {
        let storage = MemoryStore::new();
        storage.set(PENDING_ROLE_KEY, "admin").await;
        assert!(restore_pending_role(&storage).await.is_none());
        assert!(storage.get(PENDING_ROLE_KEY).await.is_none());
    }
}
