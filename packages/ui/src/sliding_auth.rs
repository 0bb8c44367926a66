//! The two-panel sign-in / sign-up card.
//!
//! Purely presentational: every value it shows and every action it can take is a
//! field of [`SlidingAuthProps`]. The owning view keeps the state.

use api::{OAuthProvider, Role};
use dioxus::prelude::*;

use crate::controller::{AuthMode, SignInFields, SignUpFields};
use crate::icons::brands::{FaApple, FaGoogle, FaLinkedin};
use crate::{Icon, VIEWS_CSS};

#[derive(Props, Clone, PartialEq)]
pub struct SlidingAuthProps {
    /// Which form is in front.
    pub mode: AuthMode,
    pub sign_in: SignInFields,
    pub sign_up: SignUpFields,
    /// Disables both submit buttons while a request is in flight.
    pub loading: bool,

    /// "Sign In" / "Sign Up" on the sliding panel.
    pub on_mode: EventHandler<AuthMode>,

    pub on_sign_in_email: EventHandler<String>,
    pub on_sign_in_password: EventHandler<String>,
    pub on_sign_in: EventHandler<()>,

    pub on_sign_up_name: EventHandler<String>,
    pub on_sign_up_email: EventHandler<String>,
    pub on_sign_up_password: EventHandler<String>,
    pub on_role_select: EventHandler<Role>,
    pub on_sign_up: EventHandler<()>,

    pub on_oauth: EventHandler<OAuthProvider>,
}

#[allow(non_snake_case)]
pub fn SlidingAuth(props: SlidingAuthProps) -> Element {
    let is_sign_up = props.mode == AuthMode::SignUp;
    let on_mode = props.on_mode;
    let on_sign_in = props.on_sign_in;
    let on_sign_up = props.on_sign_up;
    let on_sign_in_email = props.on_sign_in_email;
    let on_sign_in_password = props.on_sign_in_password;
    let on_sign_up_name = props.on_sign_up_name;
    let on_sign_up_email = props.on_sign_up_email;
    let on_sign_up_password = props.on_sign_up_password;
    let on_role_select = props.on_role_select;

    let selected = props.sign_up.role;
    let role_class = move |role: Role| {
        if selected == Some(role) {
            "btn btn-primary"
        } else {
            "btn btn-outline"
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "sliding-auth",

            div {
                class: if is_sign_up { "auth-capsule auth-capsule-right" } else { "auth-capsule auth-capsule-left" },
                if is_sign_up {
                    h2 { "Hello Friend!" }
                    p { "Register to start your journey with us." }
                    button {
                        class: "btn btn-outline-light",
                        onclick: move |_| on_mode.call(AuthMode::SignIn),
                        "Sign In"
                    }
                } else {
                    h2 { "Welcome Back!" }
                    p { "Login to continue where you left off." }
                    button {
                        class: "btn btn-outline-light",
                        onclick: move |_| on_mode.call(AuthMode::SignUp),
                        "Sign Up"
                    }
                }
            }

            div {
                class: "auth-forms",

                div {
                    class: if is_sign_up { "auth-form-slot hidden" } else { "auth-form-slot" },
                    form {
                        class: "auth-form",
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            on_sign_in.call(());
                        },
                        h2 { "Sign In" }
                        label { "Email" }
                        input {
                            r#type: "email",
                            value: "{props.sign_in.email}",
                            oninput: move |evt: FormEvent| on_sign_in_email.call(evt.value()),
                        }
                        label { "Password" }
                        input {
                            r#type: "password",
                            value: "{props.sign_in.password}",
                            oninput: move |evt: FormEvent| on_sign_in_password.call(evt.value()),
                        }
                        button {
                            class: "btn btn-primary btn-block",
                            r#type: "submit",
                            disabled: props.loading,
                            if props.loading { "Signing in..." } else { "Sign In" }
                        }
                        OAuthButtons { on_oauth: props.on_oauth }
                    }
                }

                div {
                    class: if is_sign_up { "auth-form-slot" } else { "auth-form-slot hidden" },
                    form {
                        class: "auth-form",
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            on_sign_up.call(());
                        },
                        h2 { "Create Account" }
                        div {
                            class: "role-picker",
                            for role in [Role::JobSeeker, Role::Employer] {
                                button {
                                    key: "{role}",
                                    r#type: "button",
                                    class: role_class(role),
                                    onclick: move |_| on_role_select.call(role),
                                    "{role.label()}"
                                }
                            }
                        }
                        label { "Name" }
                        input {
                            value: "{props.sign_up.name}",
                            oninput: move |evt: FormEvent| on_sign_up_name.call(evt.value()),
                        }
                        label { "Email" }
                        input {
                            r#type: "email",
                            value: "{props.sign_up.email}",
                            oninput: move |evt: FormEvent| on_sign_up_email.call(evt.value()),
                        }
                        label { "Password" }
                        input {
                            r#type: "password",
                            value: "{props.sign_up.password}",
                            oninput: move |evt: FormEvent| on_sign_up_password.call(evt.value()),
                        }
                        button {
                            class: "btn btn-primary btn-block",
                            r#type: "submit",
                            disabled: selected.is_none() || props.loading,
                            if props.loading { "Creating..." } else { "Sign Up" }
                        }
                        OAuthButtons { on_oauth: props.on_oauth }
                    }
                }
            }
        }
    }
}

#[component]
fn OAuthButtons(on_oauth: EventHandler<OAuthProvider>) -> Element {
    rsx! {
        div {
            class: "oauth-buttons",
            for provider in OAuthProvider::ALL {
                button {
                    key: "{provider}",
                    r#type: "button",
                    class: "btn btn-outline",
                    title: "Continue with {provider.label()}",
                    onclick: move |_| on_oauth.call(provider),
                    {provider_icon(provider)}
                }
            }
        }
    }
}

fn provider_icon(provider: OAuthProvider) -> Element {
    match provider {
        OAuthProvider::Google => rsx! { Icon { icon: FaGoogle, width: 20, height: 20 } },
        OAuthProvider::Apple => rsx! { Icon { icon: FaApple, width: 20, height: 20 } },
        OAuthProvider::LinkedIn => rsx! { Icon { icon: FaLinkedin, width: 18, height: 18 } },
    }
}
