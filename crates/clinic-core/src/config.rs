//! Remote store configuration.
//!
//! Loaded from JSON text, from the environment, or (in the browser portal)
//! from values baked in at compile time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_URL: &str = "CLINIC_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "CLINIC_SUPABASE_ANON_KEY";
pub const ENV_ACCESS_TOKEN: &str = "CLINIC_ACCESS_TOKEN";

/// Connection settings for the hosted relational store
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub url: String,
    /// Public API key sent as `apikey` on every request
    pub anon_key: String,
    /// Bearer token of the signed-in user, if there is one
    #[serde(default)]
    pub access_token: Option<String>,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read `CLINIC_SUPABASE_URL`, `CLINIC_SUPABASE_ANON_KEY` and the optional
    /// `CLINIC_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; the portal passes `option_env!` values here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_URL).ok_or(ConfigError::Missing(ENV_URL))?;
        let anon_key = lookup(ENV_ANON_KEY).ok_or(ConfigError::Missing(ENV_ANON_KEY))?;
        let config = StoreConfig {
            url,
            anon_key,
            access_token: lookup(ENV_ACCESS_TOKEN).filter(|t| !t.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Missing("url"));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::Missing("anon_key"));
        }
        Ok(())
    }

    /// `{url}/rest/v1/{table}`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }

    /// `{url}/auth/v1/{path}`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_json() {
        let config = StoreConfig::from_json(
            r#"{ "url": "https://clinic.supabase.co/", "anon_key": "anon" }"#,
        )
        .unwrap();
        assert_eq!(config.access_token, None);
        assert_eq!(
            config.rest_url("patients"),
            "https://clinic.supabase.co/rest/v1/patients"
        );
        assert_eq!(config.auth_url("user"), "https://clinic.supabase.co/auth/v1/user");
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = StoreConfig::new("clinic.supabase.co", "anon").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "url", .. }));
        assert_eq!(
            StoreConfig::new("https://x", " ").validate(),
            Err(ConfigError::Missing("anon_key"))
        );
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_URL, "https://clinic.supabase.co"),
            (ENV_ANON_KEY, "anon"),
            (ENV_ACCESS_TOKEN, ""),
        ]
        .into_iter()
        .collect();
        let config = StoreConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.anon_key, "anon");
        assert_eq!(config.access_token, None);

        let missing = StoreConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(missing, ConfigError::Missing(ENV_URL));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(StoreConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
