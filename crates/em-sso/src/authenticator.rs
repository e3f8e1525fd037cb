//! # SSO Authenticator
//!
//! Turns the provider's cookie into an [`Identity`], or tells the caller
//! where to send the user to log in.
//!
//! ## Flow
//!
//! ```text
//! cookie ──quote──→ JSON token ──unsign_json──→ Value ──deserialize──→ Identity
//!                                   │
//!                                   └── any error ──→ Redirect(login_url?next=…)
//! ```
//!
//! The signing salt is the cookie name, as chosen by the provider.
//! Cookie parsers usually strip the surrounding quotes from the raw value,
//! so they are put back before verification.

use std::sync::Arc;

use em_signing::{
    Signer, SigningError, SigningService, SystemTimeSource, TimeSource, TokenSigningApi,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SsoConfig;
use crate::identity::Identity;

/// Why a request is not authenticated.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    /// The request carried no SSO cookie
    #[error("SSO cookie missing")]
    MissingCookie,

    /// The cookie failed verification
    #[error("SSO cookie rejected: {0}")]
    Rejected(#[from] SigningError),

    /// The cookie verified but does not describe a user
    #[error("SSO cookie payload is not an identity: {0}")]
    InvalidIdentity(String),

    /// Cookies cannot be issued without a secret
    #[error("SSO is running in debug mode")]
    DebugMode,
}

/// What the web layer should do with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    /// Proceed as this user
    Allow(Identity),
    /// Send the user to this URL
    Redirect(String),
}

enum Mode {
    Debug,
    Verifying(Arc<dyn TokenSigningApi>),
}

/// Verifies SSO cookies.
pub struct SsoAuthenticator {
    mode: Mode,
    login_url: String,
    max_age: Option<u64>,
}

impl SsoAuthenticator {
    /// Build from configuration, reading the system clock.
    ///
    /// Without a secret the authenticator runs in debug mode and lets every
    /// request through as [`Identity::debug_user`].
    pub fn from_config(config: &SsoConfig) -> Self {
        Self::from_config_with_clock(config, SystemTimeSource)
    }

    /// Build from configuration with an explicit clock.
    ///
    /// Cookies are verified with the cookie name as salt and the configured
    /// timestamp alphabet.
    pub fn from_config_with_clock<T: TimeSource + 'static>(config: &SsoConfig, clock: T) -> Self {
        match &config.secret {
            Some(secret) if !config.is_debug() => {
                let signer = Signer::new(secret.clone(), config.cookie_name.as_str());
                let service =
                    SigningService::with_clock(signer, clock).with_alphabet(config.alphabet);
                Self::with_signer(Arc::new(service), config)
            }
            _ => {
                warn!("No SSO secret configured; every request is the debug user");
                Self {
                    mode: Mode::Debug,
                    login_url: config.login_url.clone(),
                    max_age: config.max_age,
                }
            }
        }
    }

    /// Build around an existing signer.
    ///
    /// The signer must be salted with the cookie name and decode timestamps
    /// with `config.alphabet`; only login URL and maximum age are taken from
    /// `config`.
    pub fn with_signer(signer: Arc<dyn TokenSigningApi>, config: &SsoConfig) -> Self {
        Self {
            mode: Mode::Verifying(signer),
            login_url: config.login_url.clone(),
            max_age: config.max_age,
        }
    }

    /// Whether cookies are ignored.
    pub fn is_debug(&self) -> bool {
        matches!(self.mode, Mode::Debug)
    }

    /// Verify a raw cookie value.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingCookie` - `cookie` is absent or empty
    /// - `AuthError::Rejected` - signature, envelope or expiry check failed
    /// - `AuthError::InvalidIdentity` - payload lacks a username
    pub fn authenticate(&self, cookie: Option<&str>) -> Result<Identity, AuthError> {
        let signer = match &self.mode {
            Mode::Debug => return Ok(Identity::debug_user()),
            Mode::Verifying(signer) => signer,
        };

        let cookie = cookie
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingCookie)?;

        let token = requote(cookie);
        let value = signer.unsign_json(&token, self.max_age)?;
        let identity: Identity = serde_json::from_value(value)
            .map_err(|e| AuthError::InvalidIdentity(e.to_string()))?;

        debug!(username = %identity.username, "SSO cookie accepted");
        Ok(identity)
    }

    /// Login URL that returns the user to `original_url` on `host`.
    pub fn login_redirect(&self, host: &str, original_url: &str) -> String {
        let next = format!("https://{}{}", host, original_url);
        format!("{}?next={}", self.login_url, urlencoding::encode(&next))
    }

    /// Authenticate, or produce the login redirect.
    ///
    /// Every failure is treated the same way: the user logs in again.
    pub fn decide(&self, cookie: Option<&str>, host: &str, original_url: &str) -> AuthDecision {
        match self.authenticate(cookie) {
            Ok(identity) => AuthDecision::Allow(identity),
            Err(e) => {
                debug!(error = %e, "Redirecting to SSO login");
                AuthDecision::Redirect(self.login_redirect(host, original_url))
            }
        }
    }

    /// Mint a cookie value for `identity`, quotes included.
    ///
    /// # Errors
    ///
    /// - `AuthError::DebugMode` - no secret to sign with
    /// - `AuthError::Rejected` - `identity` could not be serialized
    pub fn issue_cookie(&self, identity: &Identity) -> Result<String, AuthError> {
        let Mode::Verifying(signer) = &self.mode else {
            return Err(AuthError::DebugMode);
        };
        let value = serde_json::to_value(identity)
            .map_err(|e| SigningError::JsonSerialize(e.to_string()))?;
        Ok(signer.sign_json(&value)?)
    }
}

/// Restore the quotes a cookie parser may have stripped.
fn requote(cookie: &str) -> String {
    let quoted = cookie.len() >= 2 && cookie.starts_with('"') && cookie.ends_with('"');
    if quoted {
        cookie.to_string()
    } else {
        format!("\"{}\"", cookie)
    }
}
