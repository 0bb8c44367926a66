use dioxus::prelude::*;

use crate::destination::Destination;
use crate::header::{
    log_out, GuestAction, HeaderView, MenuEntry, MenuIcon, ABOUT_LINKS, COMPANY_CATEGORIES,
    JOB_CATEGORIES, TOP_LINKS,
};
use crate::icons::{
    FaArrowTrendUp, FaBolt, FaBookOpen, FaBuilding, FaChevronDown, FaCircleUser, FaCode,
    FaGauge, FaHeadphones, FaMessage, FaPalette, FaRightFromBracket, FaRocket, FaScaleBalanced,
    FaUsers,
};
use crate::session::{use_identity, use_session};
use crate::{Icon, VIEWS_CSS};

/// Site header: logo, marketing menus and the session-dependent actions.
#[component]
pub fn Navbar(on_navigate: EventHandler<Destination>) -> Element {
    let session = use_session();
    let view = HeaderView::for_session(session().session.as_ref());

    let actions = match view {
        HeaderView::Guest => rsx! {
            for action in GuestAction::ALL {
                button {
                    key: "{action.label()}",
                    class: if action == GuestAction::Login { "btn btn-ghost" } else { "btn btn-primary" },
                    onclick: move |_| on_navigate.call(action.destination()),
                    "{action.label()}"
                }
            }
        },
        HeaderView::Account(menu) => rsx! {
            AccountDropdown {
                email: menu.email,
                dashboard: menu.dashboard,
                on_navigate,
            }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            div {
                class: "navbar-left",
                div {
                    class: "navbar-brand",
                    onclick: move |_| on_navigate.call(Destination::Home),
                    span { class: "navbar-logo", "JobKonnect.io" }
                }
                div {
                    class: "navbar-menus",
                    MenuDropdown { title: "Jobs", heading: "Job Categories", entries: JOB_CATEGORIES.to_vec() }
                    MenuDropdown { title: "Companies", heading: "Company Categories", entries: COMPANY_CATEGORIES.to_vec() }
                    MenuDropdown { title: "About Us", entries: ABOUT_LINKS.to_vec() }
                    for link in TOP_LINKS {
                        button { key: "{link}", class: "navbar-link", "{link}" }
                    }
                }
            }
            div {
                class: "navbar-right",
                {actions}
            }
        }
    }
}

#[component]
fn MenuDropdown(
    title: &'static str,
    #[props(default)] heading: Option<&'static str>,
    entries: Vec<MenuEntry>,
) -> Element {
    rsx! {
        div {
            class: "menu-group",
            button {
                class: "navbar-link",
                "{title}"
                Icon { icon: FaChevronDown, width: 12, height: 12 }
            }
            div {
                class: "menu-panel",
                if let Some(heading) = heading {
                    h3 { class: "menu-heading", "{heading}" }
                }
                for entry in entries {
                    div {
                        key: "{entry.name}",
                        class: "menu-item",
                        MenuGlyph { icon: entry.icon }
                        span { "{entry.name}" }
                    }
                }
            }
        }
    }
}

#[component]
fn MenuGlyph(icon: MenuIcon) -> Element {
    match icon {
        MenuIcon::Code => rsx! { Icon { icon: FaCode, width: 16, height: 16 } },
        MenuIcon::TrendingUp => rsx! { Icon { icon: FaArrowTrendUp, width: 16, height: 16 } },
        MenuIcon::Headphones => rsx! { Icon { icon: FaHeadphones, width: 16, height: 16 } },
        MenuIcon::Palette => rsx! { Icon { icon: FaPalette, width: 16, height: 16 } },
        MenuIcon::Scale => rsx! { Icon { icon: FaScaleBalanced, width: 16, height: 16 } },
        MenuIcon::Rocket => rsx! { Icon { icon: FaRocket, width: 16, height: 16 } },
        MenuIcon::Building => rsx! { Icon { icon: FaBuilding, width: 16, height: 16 } },
        MenuIcon::Bolt => rsx! { Icon { icon: FaBolt, width: 16, height: 16 } },
        MenuIcon::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
        MenuIcon::Book => rsx! { Icon { icon: FaBookOpen, width: 16, height: 16 } },
        MenuIcon::UserCircle => rsx! { Icon { icon: FaCircleUser, width: 16, height: 16 } },
        MenuIcon::Message => rsx! { Icon { icon: FaMessage, width: 16, height: 16 } },
    }
}

#[component]
fn AccountDropdown(
    email: String,
    dashboard: Destination,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let identity = use_identity();
    let mut open = use_signal(|| false);

    let handle_logout = move |_| {
        open.set(false);
        let identity = identity.clone();
        spawn(async move {
            let destination = log_out(&identity).await;
            on_navigate.call(destination);
        });
    };

    rsx! {
        div {
            class: "account-menu",
            button {
                class: "btn btn-ghost",
                onclick: move |_| open.toggle(),
                Icon { icon: FaCircleUser, width: 20, height: 20 }
                span { "My Account" }
                Icon { icon: FaChevronDown, width: 12, height: 12 }
            }
            if open() {
                div {
                    class: "account-panel",
                    div { class: "account-email", "{email}" }
                    hr {}
                    button {
                        class: "menu-item",
                        onclick: move |_| {
                            open.set(false);
                            on_navigate.call(dashboard.clone());
                        },
                        Icon { icon: FaGauge, width: 16, height: 16 }
                        span { "Dashboard" }
                    }
                    button {
                        class: "menu-item",
                        Icon { icon: FaCircleUser, width: 16, height: 16 }
                        span { "Profile" }
                    }
                    hr {}
                    button {
                        class: "menu-item",
                        onclick: handle_logout,
                        Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                        span { "Log out" }
                    }
                }
            }
        }
    }
}
