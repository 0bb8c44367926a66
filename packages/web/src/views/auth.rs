use dioxus::prelude::*;
use ui::views::AuthView;
use ui::{AuthMode, Destination};

use crate::go_to;

/// `/auth?mode=signin|signup`
#[component]
pub fn Auth(mode: String) -> Element {
    let nav = use_navigator();

    rsx! {
        AuthView {
            initial_mode: AuthMode::from_query(&mode),
            on_navigate: move |destination: Destination| go_to(nav, destination),
        }
    }
}
