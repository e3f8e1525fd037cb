//! # Emailinator SSO
//!
//! Verifies the staff single-sign-on cookie and decides whether a request
//! may proceed. No HTTP framework is involved: the web layer hands over the
//! raw cookie value, host and path, and acts on the returned [`AuthDecision`].
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `config` | `SsoConfig` defaults and environment overrides |
//! | `identity` | `Identity` record carried in the cookie |
//! | `authenticator` | cookie verification and login redirects |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authenticator;
pub mod config;
pub mod identity;

// Re-exports
pub use authenticator::{AuthDecision, AuthError, SsoAuthenticator};
pub use config::{ConfigError, SsoConfig};
pub use identity::Identity;
