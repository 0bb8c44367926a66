//! Platform glue: which identity client runs, where OAuth returns to, and how the
//! browser leaves the app.

use api::{AuthError, ConfigError, Session, SupabaseClient, SupabaseConfig};
use url::Url;

/// The identity client used by the running app.
pub type Identity = SupabaseClient<store::PlatformStore>;

const DEV_ORIGIN: &str = "http://localhost:8080";

pub fn make_identity(config: SupabaseConfig) -> Result<Identity, ConfigError> {
    SupabaseClient::new(config, store::make_store())
}

/// Where OAuth and confirmation emails send the user back to: the site root.
///
/// The browser's own origin wins on the web; elsewhere the configured `site_url`,
/// then the dev server.
pub fn redirect_target(config: &SupabaseConfig) -> String {
    let origin = browser_origin()
        .or_else(|| config.site_url.clone())
        .unwrap_or_else(|| DEV_ORIGIN.to_string());
    format!("{}/", origin.trim_end_matches('/'))
}

#[cfg(target_arch = "wasm32")]
fn browser_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_origin() -> Option<String> {
    None
}

/// Full-page navigation away from the app.
pub fn redirect_external(url: &Url) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url.as_str()) {
                tracing::error!("Failed to redirect to {}: {:?}", url, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("External redirect not supported on this platform: {}", url);
    }
}

/// Finish an OAuth or email-confirmation round-trip if the page URL carries one,
/// then strip the tokens from the address bar.
pub async fn complete_redirect(identity: &Identity) -> Result<Option<Session>, AuthError> {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let location = window.location();
        let Ok(href) = location.href() else {
            return Ok(None);
        };
        let has_fragment = location.hash().map(|h| h.len() > 1).unwrap_or(false);
        if !has_fragment {
            return Ok(None);
        }

        let result = identity.session_from_redirect(&href).await;
        if let Ok(path) = location.pathname() {
            if let Ok(history) = window.history() {
                let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
            }
        }
        result
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = identity;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target_prefers_site_url() {
        let config = SupabaseConfig::new("https://demo.supabase.co", "anon")
            .with_site_url("https://jobkonnect.io/");
        assert_eq!(redirect_target(&config), "https://jobkonnect.io/");

        let config = SupabaseConfig::new("https://demo.supabase.co", "anon");
        assert_eq!(redirect_target(&config), "http://localhost:8080/");
    }
}
