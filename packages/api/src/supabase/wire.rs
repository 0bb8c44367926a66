//! Wire-level helpers for the Supabase REST API.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::models::Role;

/// Error body shapes returned by GoTrue and PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Turn a non-success response into an [`AuthError::Service`].
pub(crate) fn service_error(status: u16, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string());
    AuthError::service(status, message)
}

#[derive(Serialize)]
pub(crate) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct SignUpBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
pub(crate) struct SignUpMetadata<'a> {
    pub full_name: &'a str,
    pub role: Role,
}

#[derive(Deserialize)]
pub(crate) struct ProfileRow {
    #[serde(default)]
    pub role: Option<String>,
}

/// Tokens delivered in the URL fragment after an OAuth round-trip.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RedirectTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
    pub error_description: Option<String>,
}

impl RedirectTokens {
    pub(crate) fn from_fragment(fragment: &str) -> Self {
        let mut tokens = Self::default();
        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "access_token" => tokens.access_token = Some(value),
                "refresh_token" => tokens.refresh_token = Some(value),
                "expires_in" => tokens.expires_in = value.parse().ok(),
                "expires_at" => tokens.expires_at = value.parse().ok(),
                "token_type" => tokens.token_type = Some(value),
                "error_description" => tokens.error_description = Some(value),
                _ => {}
            }
        }
        tokens
    }
}

/// Current unix time in seconds.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_prefers_msg() {
        let err = service_error(400, r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#);
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_service_error_oauth_style() {
        let err = service_error(
            400,
            r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#,
        );
        assert!(matches!(err, AuthError::Service { status: 400, .. }));
        assert_eq!(err.to_string(), "Email not confirmed");
    }

    #[test]
    fn test_service_error_plain_text_body() {
        let err = service_error(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_redirect_tokens_from_fragment() {
        let tokens = RedirectTokens::from_fragment(
            "access_token=abc&expires_in=3600&refresh_token=r1&token_type=bearer&type=signup",
        );
        assert_eq!(tokens.access_token.as_deref(), Some("abc"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("r1"));
        assert_eq!(tokens.expires_in, Some(3600));
        assert!(tokens.error_description.is_none());
    }

    #[test]
    fn test_redirect_error_fragment() {
        let tokens = RedirectTokens::from_fragment(
            "error=access_denied&error_description=Email+link+is+invalid+or+has+expired",
        );
        assert!(tokens.access_token.is_none());
        assert_eq!(
            tokens.error_description.as_deref(),
            Some("Email link is invalid or has expired")
        );
    }
}
