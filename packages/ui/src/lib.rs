//! # UI crate: the JobKonnect header and auth screen
//!
//! Shared Dioxus components plus the plain-Rust models behind them. The models
//! ([`controller`], [`header`], [`destination`]) hold all of the behaviour and are
//! tested without a renderer; the components only bind them to the DOM.
//!
//! Components never navigate themselves. They emit a [`Destination`] through an
//! `on_navigate` handler and the platform crate maps it onto its router.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;

    pub mod brands {
        pub use dioxus_free_icons::icons::fa_brands_icons::*;
    }
}

pub const VIEWS_CSS: Asset = asset!("/src/views/views.css");

pub mod controller;
pub use controller::{AuthMode, AuthScreen, Outcome, Submission};

pub mod destination;
pub use url::Url;
pub use destination::Destination;

pub mod header;
pub use header::{follow_sessions, log_out, HeaderView};

pub mod platform;
pub use platform::{make_identity, Identity};

mod session;
pub use session::{use_identity, use_session, SessionProvider, SessionState};

pub mod toast;
pub use toast::{show_toast, use_toasts, Toast, ToastLevel, ToastProvider};

mod navbar;
pub use navbar::Navbar;

mod sliding_auth;
pub use sliding_auth::{SlidingAuth, SlidingAuthProps};

pub mod views;
