use dioxus::prelude::*;
use ui::use_session;

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let greeting = match session().session {
        Some(session) => format!("Welcome back, {}", session.user.display_email()),
        None => "Find your next job, or your next hire.".to_string(),
    };

    rsx! {
        section {
            class: "page hero",
            h1 { "JobKonnect.io" }
            p { "{greeting}" }
        }
    }
}
