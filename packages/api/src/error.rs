//! Error types for identity-service calls and configuration.

use thiserror::Error;

/// Failure of a call to the identity service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service answered with an error body.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("no active session")]
    MissingSession,
}

impl AuthError {
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// The human-readable message to show a user, if there is a non-empty one.
    pub fn user_message(&self) -> Option<String> {
        let message = self.to_string();
        let message = message.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }
}

/// Failure to load [`crate::SupabaseConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
