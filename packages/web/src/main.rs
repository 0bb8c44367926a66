use dioxus::prelude::*;
use dioxus::router::Navigator;

use api::SupabaseConfig;
use ui::{Destination, Navbar, SessionProvider, ToastProvider};
use views::{Auth, EmployerDashboard, Home, SeekerDashboard};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/seeker-dashboard")]
        SeekerDashboard {},
        #[route("/employer-dashboard")]
        EmployerDashboard {},
    #[end_layout]
    #[route("/auth?:mode")]
    Auth { mode: String },
}

impl Route {
    /// The route for an in-app destination. `None` for external URLs.
    fn for_destination(destination: &Destination) -> Option<Route> {
        match destination {
            Destination::Home => Some(Route::Home {}),
            Destination::Auth => Some(Route::Auth { mode: String::new() }),
            Destination::SeekerDashboard => Some(Route::SeekerDashboard {}),
            Destination::EmployerDashboard => Some(Route::EmployerDashboard {}),
            Destination::External(_) => None,
        }
    }
}

/// Push a destination onto the router, or leave the app for an external one.
pub(crate) fn go_to(nav: Navigator, destination: Destination) {
    match Route::for_destination(&destination) {
        Some(route) => {
            nav.push(route);
        }
        None => {
            if let Destination::External(url) = destination {
                ui::platform::redirect_external(&url);
            }
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let identity = use_hook(|| {
        SupabaseConfig::load()
            .and_then(ui::make_identity)
            .map_err(|e| {
                tracing::error!("Identity service not configured: {}", e);
                e.to_string()
            })
    });

    let content = match identity {
        Ok(identity) => rsx! {
            ToastProvider {
                SessionProvider {
                    identity,
                    Router::<Route> {}
                }
            }
        },
        Err(message) => rsx! {
            ConfigurationError { message }
        },
    };

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::VIEWS_CSS }

        {content}
    }
}

/// Header above every page except the auth screen.
#[component]
fn Shell() -> Element {
    let nav = use_navigator();

    rsx! {
        Navbar { on_navigate: move |destination: Destination| go_to(nav, destination) }
        Outlet::<Route> {}
    }
}

#[component]
fn ConfigurationError(message: String) -> Element {
    rsx! {
        div {
            class: "config-error",
            h2 { "JobKonnect is not configured" }
            p { "{message}" }
            p {
                "Set "
                code { "SUPABASE_URL" }
                " and "
                code { "SUPABASE_ANON_KEY" }
                " (a "
                code { ".env" }
                " file works for local development)."
            }
        }
    }
}
