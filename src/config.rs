use thiserror::Error;
use tracing::debug;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "NUMUS_MODEL";
pub const API_BASE_VAR: &str = "NUMUS_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const KEYRING_SERVICE: &str = "numus";
const KEYRING_USER: &str = "gemini-api-key";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub advice: AdviceConfig,
}

impl Config {
    /// Reads the process environment, falling back to the system keyring for the API key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        if config.advice.api_key.is_none() {
            config.advice.api_key = keyring_api_key();
        }
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut advice = AdviceConfig {
            api_key: lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()),
            ..AdviceConfig::default()
        };

        if let Some(model) = lookup(MODEL_VAR) {
            let model = model.trim();
            if model.is_empty() {
                return Err(ConfigError::Empty(MODEL_VAR));
            }
            advice.model = model.to_string();
        }

        if let Some(base) = lookup(API_BASE_VAR) {
            let base = base.trim();
            if !(base.starts_with("https://") || base.starts_with("http://")) {
                return Err(ConfigError::InvalidUrl {
                    var: API_BASE_VAR,
                    value: base.to_string(),
                });
            }
            advice.api_base = base.to_string();
        }

        Ok(Self { advice })
    }
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn keyring_api_key() -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    match entry.get_password() {
        Ok(key) => Some(key),
        Err(e) => {
            debug!(error = %e, "keyring_api_key_unavailable");
            None
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn keyring_api_key() -> Option<String> {
    debug!(service = KEYRING_SERVICE, user = KEYRING_USER, "keyring_unsupported");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.advice.model, DEFAULT_MODEL);
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, " gemini-2.5-pro "),
            (API_BASE_VAR, "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(config.advice.api_key.as_deref(), Some("secret"));
        assert_eq!(config.advice.model, "gemini-2.5-pro");
        assert_eq!(config.advice.api_base, "http://localhost:8080");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap();
        assert_eq!(config.advice.api_key, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[(MODEL_VAR, "")])),
            Err(ConfigError::Empty(MODEL_VAR))
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[(API_BASE_VAR, "ftp://x")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
