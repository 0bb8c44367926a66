//! # Navigation header model
//!
//! What the header shows, independent of how it is drawn: the static marketing
//! menus, and either the guest actions or the account menu depending on the
//! current session.
//!
//! The header never owns the session. [`follow_sessions`] feeds it a read-only copy:
//! it subscribes to the identity service's change stream, fetches the current
//! session once, then hands every later change to a callback. The subscription is
//! held inside the returned future, so dropping the future (component teardown)
//! releases it.

use api::{IdentityService, Session};

use crate::destination::Destination;

/// Icons used by the static menus. The component maps these to glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuIcon {
    Code,
    TrendingUp,
    Headphones,
    Palette,
    Scale,
    Rocket,
    Building,
    Bolt,
    Users,
    Book,
    UserCircle,
    Message,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub name: &'static str,
    pub icon: MenuIcon,
}

const fn entry(name: &'static str, icon: MenuIcon) -> MenuEntry {
    MenuEntry { name, icon }
}

pub const JOB_CATEGORIES: [MenuEntry; 6] = [
    entry("Development & IT", MenuIcon::Code),
    entry("Marketing & Sales", MenuIcon::TrendingUp),
    entry("Customer Service", MenuIcon::Headphones),
    entry("Design & Creative", MenuIcon::Palette),
    entry("Legal & Finance", MenuIcon::Scale),
    entry("Product Management", MenuIcon::Rocket),
];

pub const COMPANY_CATEGORIES: [MenuEntry; 4] = [
    entry("Tech Companies", MenuIcon::Building),
    entry("Startups", MenuIcon::Bolt),
    entry("Enterprise", MenuIcon::Building),
    entry("Remote-First", MenuIcon::Users),
];

pub const ABOUT_LINKS: [MenuEntry; 3] = [
    entry("Our Story", MenuIcon::Book),
    entry("Team", MenuIcon::UserCircle),
    entry("Blog", MenuIcon::Message),
];

pub const TOP_LINKS: [&str; 2] = ["Career", "Contact Us"];

/// Buttons shown to a visitor without a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuestAction {
    Login,
    PostJob,
}

impl GuestAction {
    pub const ALL: [GuestAction; 2] = [GuestAction::Login, GuestAction::PostJob];

    pub fn label(&self) -> &'static str {
        match self {
            GuestAction::Login => "Login",
            GuestAction::PostJob => "Post a Job",
        }
    }

    /// Both actions lead to the auth screen.
    pub fn destination(&self) -> Destination {
        Destination::Auth
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccountMenu {
    pub email: String,
    pub dashboard: Destination,
}

/// The right-hand side of the header.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HeaderView {
    #[default]
    Guest,
    Account(AccountMenu),
}

impl HeaderView {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            None => HeaderView::Guest,
            Some(session) => {
                let user = &session.user;
                HeaderView::Account(AccountMenu {
                    email: user.display_email().to_string(),
                    dashboard: Destination::dashboard_for(user.user_metadata.raw_role.as_deref()),
                })
            }
        }
    }
}

/// Track the session: fetch it once, then apply every change as it arrives.
///
/// Subscribes before fetching so a change racing the fetch is not lost. Runs until
/// the identity service goes away or the future is dropped.
pub async fn follow_sessions<I, F>(identity: &I, mut apply: F)
where
    I: IdentityService,
    F: FnMut(Option<Session>),
{
    let mut subscription = identity.subscribe();

    match identity.get_session().await {
        Ok(session) => apply(session),
        Err(e) => {
            tracing::warn!("Failed to load session: {}", e);
            apply(None);
        }
    }

    while let Some(event) = subscription.next().await {
        tracing::debug!(change = ?event.change, "session change");
        apply(event.session);
    }
}

/// Sign out and return to the auth screen. Errors are only logged.
pub async fn log_out<I: IdentityService>(identity: &I) -> Destination {
    tracing::info!("Logging out");
    match identity.sign_out().await {
        Ok(()) => tracing::info!("Logged out"),
        Err(e) => tracing::error!("Error logging out: {}", e),
    }
    Destination::Auth
}
