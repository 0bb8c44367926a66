use api::{OAuthProvider, Role};
use dioxus::prelude::*;

use crate::controller::{self, restore_pending_role, AuthMode, AuthScreen, Outcome, Submission};
use crate::destination::Destination;
use crate::platform::{redirect_external, redirect_target};
use crate::session::use_identity;
use crate::sliding_auth::SlidingAuth;
use crate::toast::{show_toast, use_toasts, Toasts};

/// The auth page. Owns the [`AuthScreen`] state and runs its operations.
#[component]
pub fn AuthView(
    #[props(default)] initial_mode: AuthMode,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let identity = use_identity();
    let mut toasts = use_toasts();
    let storage = use_hook(store::make_store);
    let mut screen = use_signal(move || AuthScreen::new(initial_mode));
    let redirect_to = use_hook(|| redirect_target(identity.config()));

    // Pick up a role chosen before an OAuth round-trip.
    let pending = storage.clone();
    use_future(move || {
        let pending = pending.clone();
        async move {
            if let Some(role) = restore_pending_role(&pending).await {
                tracing::info!(%role, "Restored pending role");
                screen.write().select_role(role);
            }
        }
    });

    let handle_sign_in = {
        let identity = identity.clone();
        move |_: ()| {
            let submission = screen.write().begin_sign_in();
            match submission {
                Submission::Ready(request) => {
                    let identity = identity.clone();
                    spawn(async move {
                        let outcome = controller::sign_in(&identity, &identity, request).await;
                        apply_outcome(screen, toasts, on_navigate, outcome);
                    });
                }
                Submission::Busy => {}
                Submission::Rejected(toast) => show_toast(&mut toasts, toast),
            }
        }
    };

    let handle_sign_up = {
        let identity = identity.clone();
        let redirect_to = redirect_to.clone();
        move |_: ()| {
            let submission = screen.write().begin_sign_up(&redirect_to);
            match submission {
                Submission::Ready(request) => {
                    let identity = identity.clone();
                    spawn(async move {
                        let outcome = controller::sign_up(&identity, request).await;
                        apply_outcome(screen, toasts, on_navigate, outcome);
                    });
                }
                Submission::Busy => {}
                Submission::Rejected(toast) => show_toast(&mut toasts, toast),
            }
        }
    };

    let handle_oauth = move |provider: OAuthProvider| {
        let identity = identity.clone();
        let storage = storage.clone();
        let redirect_to = redirect_to.clone();
        let role = screen.read().sign_up.role;
        spawn(async move {
            let outcome = controller::oauth(&identity, &storage, provider, role, &redirect_to).await;
            present(toasts, on_navigate, outcome);
        });
    };

    let current = screen();

    rsx! {
        div {
            class: "auth-page",
            SlidingAuth {
                mode: current.mode(),
                sign_in: current.sign_in.clone(),
                sign_up: current.sign_up.clone(),
                loading: current.loading(),
                on_mode: move |mode: AuthMode| screen.write().show(mode),
                on_sign_in_email: move |value: String| screen.write().sign_in.email = value,
                on_sign_in_password: move |value: String| screen.write().sign_in.password = value,
                on_sign_in: handle_sign_in,
                on_sign_up_name: move |value: String| screen.write().sign_up.name = value,
                on_sign_up_email: move |value: String| screen.write().sign_up.email = value,
                on_sign_up_password: move |value: String| screen.write().sign_up.password = value,
                on_role_select: move |role: Role| screen.write().select_role(role),
                on_sign_up: handle_sign_up,
                on_oauth: handle_oauth,
            }
        }
    }
}

fn apply_outcome(
    mut screen: Signal<AuthScreen>,
    toasts: Signal<Toasts>,
    on_navigate: EventHandler<Destination>,
    outcome: Outcome,
) {
    screen.write().finish(&outcome);
    present(toasts, on_navigate, outcome);
}

/// Show the toast and follow the navigation of a finished operation.
fn present(mut toasts: Signal<Toasts>, on_navigate: EventHandler<Destination>, outcome: Outcome) {
    if let Some(toast) = outcome.toast {
        show_toast(&mut toasts, toast);
    }
    match outcome.navigate {
        Some(Destination::External(url)) => redirect_external(&url),
        Some(destination) => on_navigate.call(destination),
        None => {}
    }
}
