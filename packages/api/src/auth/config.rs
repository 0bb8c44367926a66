//! # Supabase project configuration
//!
//! [`SupabaseConfig`] names the hosted project the front end talks to. It can come
//! from the environment or from a TOML document:
//!
//! ```toml
//! url = "https://xyzcompany.supabase.co"
//! anon_key = "public-anon-key"
//! site_url = "https://jobkonnect.io"   # optional, used for email/OAuth return links
//! profiles_table = "profiles"          # optional
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SUPABASE_URL` | `url` |
//! | `SUPABASE_ANON_KEY` | `anon_key` |
//! | `SITE_URL` | `site_url` |
//!
//! On native builds the variables are read at runtime (a `.env` file is loaded first).
//! Browser builds have no process environment, so the same variables are captured
//! at compile time.
//!
//! [`SupabaseConfig::load`] is what the binaries call: the environment first, then on
//! native builds the TOML file named by `JOBKONNECT_CONFIG` (default `jobkonnect.toml`
//! in the working directory) when a variable is missing.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Connection settings for the hosted identity service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    /// Public origin of this site. Falls back to the browser origin when unset.
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

/// Names the TOML file read when the environment is incomplete.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH_VAR: &str = "JOBKONNECT_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_CONFIG_FILE: &str = "jobkonnect.toml";

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            site_url: None,
            profiles_table: default_profiles_table(),
        }
    }

    /// Builder method to set the public site origin.
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = Some(site_url.into());
        self
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            let url = std::env::var("SUPABASE_URL").map_err(|_| ConfigError::Missing("SUPABASE_URL"))?;
            let anon_key = std::env::var("SUPABASE_ANON_KEY")
                .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?;
            let mut config = Self::new(url, anon_key);
            config.site_url = std::env::var("SITE_URL").ok();
            config.validate()
        }
        #[cfg(target_arch = "wasm32")]
        {
            let url = option_env!("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
            let anon_key =
                option_env!("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
            let mut config = Self::new(url, anon_key);
            config.site_url = option_env!("SITE_URL").map(str::to_string);
            config.validate()
        }
    }

    /// Load from the environment, falling back to the config file on native builds.
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = std::env::var_os(CONFIG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            Self::or_file(Self::from_env(), &path)
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_env()
        }
    }

    /// Replace a missing-variable error with the contents of `path`, if it exists.
    #[cfg(not(target_arch = "wasm32"))]
    fn or_file(env: Result<Self, ConfigError>, path: &Path) -> Result<Self, ConfigError> {
        match env {
            Err(ConfigError::Missing(var)) if path.is_file() => {
                tracing::info!(path = %path.display(), "{} not set, reading config file", var);
                Self::from_file(path)
            }
            other => other,
        }
    }

    /// Read a TOML config file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Check that the URLs parse and the key is present.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }
        self.base_url()?;
        if let Some(site) = &self.site_url {
            Url::parse(site).map_err(|source| ConfigError::InvalidUrl {
                field: "site_url",
                source,
            })?;
        }
        Ok(self)
    }

    /// The project URL with a trailing slash, ready for [`Url::join`].
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut base = self.url.trim_end_matches('/').to_string();
        base.push('/');
        Url::parse(&base).map_err(|source| ConfigError::InvalidUrl { field: "url", source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_defaults() {
        let config = SupabaseConfig::from_toml(
            r#"
            url = "https://demo.supabase.co/"
            anon_key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(config.profiles_table, "profiles");
        assert!(config.site_url.is_none());
        assert_eq!(config.base_url().unwrap().as_str(), "https://demo.supabase.co/");
    }

    #[test]
    fn test_from_toml_with_site_url() {
        let config = SupabaseConfig::from_toml(
            r#"
            url = "https://demo.supabase.co"
            anon_key = "anon"
            site_url = "https://jobkonnect.io"
            profiles_table = "member_profiles"
            "#,
        )
        .unwrap();
        assert_eq!(config.site_url.as_deref(), Some("https://jobkonnect.io"));
        assert_eq!(config.profiles_table, "member_profiles");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = SupabaseConfig::new("not a url", "anon").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { field: "url", .. }));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = SupabaseConfig::new("https://demo.supabase.co", " ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobkonnect.toml");
        std::fs::write(&path, "url = \"https://demo.supabase.co\"\nanon_key = \"anon\"\n").unwrap();
        let config = SupabaseConfig::from_file(&path).unwrap();
        assert_eq!(config, SupabaseConfig::new("https://demo.supabase.co", "anon"));

        let err = SupabaseConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_missing_variable_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobkonnect.toml");
        std::fs::write(&path, "url = \"https://file.supabase.co\"\nanon_key = \"from-file\"\n").unwrap();

        let config =
            SupabaseConfig::or_file(Err(ConfigError::Missing("SUPABASE_URL")), &path).unwrap();
        assert_eq!(config.anon_key, "from-file");

        // The environment wins when it is complete
        let env = SupabaseConfig::new("https://env.supabase.co", "from-env");
        let config = SupabaseConfig::or_file(Ok(env.clone()), &path).unwrap();
        assert_eq!(config, env);

        // No file: the original error stands
        let err = SupabaseConfig::or_file(
            Err(ConfigError::Missing("SUPABASE_URL")),
            &dir.path().join("absent.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));

        // Only a missing variable falls back
        let bad = SupabaseConfig::new("not a url", "anon").validate();
        let err = SupabaseConfig::or_file(bad, &path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_missing_field_is_toml_error() {
        let err = SupabaseConfig::from_toml(r#"url = "https://demo.supabase.co""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
