//! Transient notifications shown after auth actions.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Toasts currently on screen.
#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<(u64, Toast)>,
    next_id: u64,
}

impl Toasts {
    /// Add a toast and return its id.
    pub fn push(&mut self, toast: Toast) -> u64 {
        self.next_id += 1;
        self.entries.push((self.next_id, toast));
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }
}

const TOAST_LIFETIME_MS: u64 = 4000;

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a toast and schedule its removal.
pub fn show_toast(toasts: &mut Signal<Toasts>, toast: Toast) {
    match toast.level {
        ToastLevel::Success => tracing::info!("{}", toast.message),
        ToastLevel::Error => tracing::warn!("{}", toast.message),
    }
    let id = toasts.write().push(toast);
    let mut toasts = *toasts;
    spawn(async move {
        sleep_ms(TOAST_LIFETIME_MS).await;
        toasts.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u64) {
    gloo_timers::future::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Provides the toast context to `children` and renders the toast stack.
/// Wrap the app with this component once, near the root.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);

    let entries = toasts().entries.clone();

    rsx! {
        {children}
        div {
            class: "toast-viewport",
            for (id, toast) in entries {
                div {
                    key: "{id}",
                    class: match toast.level {
                        ToastLevel::Success => "toast toast-success",
                        ToastLevel::Error => "toast toast-error",
                    },
                    onclick: move |_| toasts.write().dismiss(id),
                    "{toast.message}"
                }
            }
        }
    }
}
