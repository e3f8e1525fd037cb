//! # SSO Configuration
//!
//! Defaults match the cinema staff site; every field can be overridden from
//! the environment.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `SSO_SECRET` | `secret` | unset (debug mode) |
//! | `SSO_COOKIE_NAME` | `cookie_name` | `icuc_auth` |
//! | `SSO_LOGIN_URL` | `login_url` | `https://staff.icucinema.co.uk/user/sso/` |
//! | `SSO_MAX_AGE` | `max_age` | unset (no expiry) |
//! | `SSO_TIMESTAMP_ALPHABET` | `alphabet` | `uppercase-first` |
//!
//! The provider writes cookie timestamps in the uppercase-first base62
//! ordering. Decoding them with the other ordering shifts the age by roughly
//! twelve years, so `alphabet` must match the provider whenever `max_age` is set.
//!
//! ## Security Requirements
//!
//! - Without `SSO_SECRET` every request is treated as the debug user.
//!   [`SsoConfig::validate_for_production`] refuses that.

use em_signing::{Base62Alphabet, SecretKey};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable holding the shared SSO secret.
pub const ENV_SECRET: &str = "SSO_SECRET";
/// Environment variable overriding the cookie name.
pub const ENV_COOKIE_NAME: &str = "SSO_COOKIE_NAME";
/// Environment variable overriding the login page.
pub const ENV_LOGIN_URL: &str = "SSO_LOGIN_URL";
/// Environment variable setting a maximum cookie age in seconds.
pub const ENV_MAX_AGE: &str = "SSO_MAX_AGE";
/// Environment variable choosing the base62 ordering of cookie timestamps.
pub const ENV_TIMESTAMP_ALPHABET: &str = "SSO_TIMESTAMP_ALPHABET";

/// Default cookie set by the SSO provider. Also the signing salt.
pub const DEFAULT_COOKIE_NAME: &str = "icuc_auth";
/// Default login page users are redirected to.
pub const DEFAULT_LOGIN_URL: &str = "https://staff.icucinema.co.uk/user/sso/";
/// Timestamp ordering the SSO provider emits (`1234567890` is `1LY7VK`).
pub const PROVIDER_ALPHABET: Base62Alphabet = Base62Alphabet::UppercaseFirst;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No secret configured; the authenticator would run in debug mode.
    #[error("SECURITY VIOLATION: SSO secret is not set. Set the SSO_SECRET environment variable.")]
    MissingSecret,

    /// Cookie name is empty, which would also make the signing salt empty.
    #[error("SSO cookie name must not be empty")]
    EmptyCookieName,
}

/// SSO cookie verification settings.
#[derive(Debug, Clone)]
pub struct SsoConfig {
    /// Shared secret with the SSO provider. `None` enables debug mode.
    pub secret: Option<SecretKey>,
    /// Cookie carrying the signed identity; doubles as the signing salt.
    pub cookie_name: String,
    /// Login page for unauthenticated users.
    pub login_url: String,
    /// Maximum cookie age in seconds, if any.
    pub max_age: Option<u64>,
    /// Base62 ordering of cookie timestamps.
    pub alphabet: Base62Alphabet,
}

impl Default for SsoConfig {
    fn default() -> Self {
        Self {
            secret: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            max_age: None,
            alphabet: PROVIDER_ALPHABET,
        }
    }
}

impl SsoConfig {
    /// Load defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load defaults overridden by `lookup`.
    ///
    /// Empty values count as unset. A `SSO_MAX_AGE` that is not a number, or
    /// an unknown `SSO_TIMESTAMP_ALPHABET`, is logged and ignored.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(secret) = lookup(ENV_SECRET) {
            config.secret = Some(SecretKey::from(secret));
            info!("Loaded SSO secret from environment");
        }

        if let Some(name) = lookup(ENV_COOKIE_NAME) {
            config.cookie_name = name;
        }

        if let Some(url) = lookup(ENV_LOGIN_URL) {
            config.login_url = url;
        }

        if let Some(raw) = lookup(ENV_MAX_AGE) {
            match raw.parse() {
                Ok(secs) => config.max_age = Some(secs),
                Err(_) => warn!(value = %raw, "{} must be a number of seconds", ENV_MAX_AGE),
            }
        }

        if let Some(raw) = lookup(ENV_TIMESTAMP_ALPHABET) {
            match parse_alphabet(&raw) {
                Some(alphabet) => config.alphabet = alphabet,
                None => warn!(
                    value = %raw,
                    "{} must be uppercase-first or lowercase-first",
                    ENV_TIMESTAMP_ALPHABET
                ),
            }
        }

        config
    }

    /// Whether cookies are actually verified.
    pub fn is_debug(&self) -> bool {
        self.secret.as_ref().map_or(true, SecretKey::is_empty)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingSecret` - no (or an empty) secret
    /// - `ConfigError::EmptyCookieName` - empty cookie name
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.is_debug() {
            return Err(ConfigError::MissingSecret);
        }
        if self.cookie_name.is_empty() {
            return Err(ConfigError::EmptyCookieName);
        }
        Ok(())
    }
}

fn parse_alphabet(raw: &str) -> Option<Base62Alphabet> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "uppercase-first" => Some(Base62Alphabet::UppercaseFirst),
        "lowercase-first" => Some(Base62Alphabet::LowercaseFirst),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SsoConfig::from_vars(vars(&[]));
        assert!(config.is_debug());
        assert_eq!(config.cookie_name, "icuc_auth");
        assert_eq!(config.login_url, "https://staff.icucinema.co.uk/user/sso/");
        assert_eq!(config.max_age, None);
        assert_eq!(config.alphabet, Base62Alphabet::UppercaseFirst);
    }

    #[test]
    fn test_overrides() {
        let config = SsoConfig::from_vars(vars(&[
            (ENV_SECRET, "s3cret"),
            (ENV_COOKIE_NAME, "staff_auth"),
            (ENV_LOGIN_URL, "https://login.example/"),
            (ENV_MAX_AGE, "3600"),
            (ENV_TIMESTAMP_ALPHABET, "lowercase-first"),
        ]));
        assert!(!config.is_debug());
        assert_eq!(config.secret, Some(SecretKey::from("s3cret")));
        assert_eq!(config.cookie_name, "staff_auth");
        assert_eq!(config.login_url, "https://login.example/");
        assert_eq!(config.max_age, Some(3600));
        assert_eq!(config.alphabet, Base62Alphabet::LowercaseFirst);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = SsoConfig::from_vars(vars(&[(ENV_SECRET, ""), (ENV_COOKIE_NAME, "")]));
        assert!(config.is_debug());
        assert_eq!(config.cookie_name, DEFAULT_COOKIE_NAME);
    }

    #[test]
    fn test_bad_max_age_is_ignored() {
        let config = SsoConfig::from_vars(vars(&[(ENV_MAX_AGE, "an hour")]));
        assert_eq!(config.max_age, None);
    }

    #[test]
    fn test_unknown_alphabet_keeps_provider_ordering() {
        let config = SsoConfig::from_vars(vars(&[(ENV_TIMESTAMP_ALPHABET, "base36")]));
        assert_eq!(config.alphabet, PROVIDER_ALPHABET);

        let config = SsoConfig::from_vars(vars(&[(ENV_TIMESTAMP_ALPHABET, " Uppercase-First ")]));
        assert_eq!(config.alphabet, Base62Alphabet::UppercaseFirst);
    }

    #[test]
    fn test_validate_for_production() {
        assert_eq!(
            SsoConfig::default().validate_for_production(),
            Err(ConfigError::MissingSecret)
        );

        let mut config = SsoConfig {
            secret: Some(SecretKey::from("s3cret")),
            ..SsoConfig::default()
        };
        assert_eq!(config.validate_for_production(), Ok(()));

        config.cookie_name.clear();
        assert_eq!(
            config.validate_for_production(),
            Err(ConfigError::EmptyCookieName)
        );

        config.secret = Some(SecretKey::new(Vec::new()));
        assert_eq!(
            config.validate_for_production(),
            Err(ConfigError::MissingSecret)
        );
    }
}
