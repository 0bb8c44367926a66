//! Landing pages after sign-in. The dashboards themselves live elsewhere; these
//! only confirm where role routing sent the user.

use dioxus::prelude::*;
use ui::use_session;

#[component]
pub fn SeekerDashboard() -> Element {
    rsx! {
        DashboardShell { title: "Job Seeker Dashboard" }
    }
}

#[component]
pub fn EmployerDashboard() -> Element {
    rsx! {
        DashboardShell { title: "Employer Dashboard" }
    }
}

#[component]
fn DashboardShell(title: &'static str) -> Element {
    let session = use_session();
    let state = session();

    rsx! {
        section {
            class: "page",
            h1 { "{title}" }
            if state.loading {
                p { "Loading..." }
            } else if let Some(session) = state.session {
                p { "Signed in as {session.user.display_email()}" }
            } else {
                p { "You are not signed in." }
            }
        }
    }
}
