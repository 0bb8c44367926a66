//! Session context shared by the header and the views.

use api::Session;
use dioxus::prelude::*;

use crate::header::follow_sessions;
use crate::platform::{complete_redirect, Identity};
use crate::toast::{show_toast, use_toasts, Toast};

/// Read-only view of the identity session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    /// True until the first session fetch has answered.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

pub fn use_identity() -> Identity {
    use_context::<Identity>()
}

/// Provides the identity client and keeps [`SessionState`] in step with it.
///
/// Must sit inside a `ToastProvider`. On mount it finishes any OAuth return found
/// in the URL, then follows session changes until unmounted.
#[component]
pub fn SessionProvider(identity: Identity, children: Element) -> Element {
    let mut state = use_signal(SessionState::default);
    let mut toasts = use_toasts();

    use_context_provider(|| identity.clone());
    use_context_provider(|| state);

    use_future(move || {
        let identity = identity.clone();
        async move {
            if let Err(e) = complete_redirect(&identity).await {
                show_toast(
                    &mut toasts,
                    Toast::error(e.user_message().unwrap_or_else(|| "Sign-in failed".to_string())),
                );
            }
            follow_sessions(&identity, move |session| {
                state.set(SessionState {
                    session,
                    loading: false,
                });
            })
            .await;
        }
    });

    rsx! {
        {children}
    }
}
