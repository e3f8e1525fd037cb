//! # Emailinator Signing
//!
//! Signed tokens byte-compatible with the upstream SSO provider, so its
//! authentication cookie can be verified without sharing anything but a secret.
//!
//! ## Layers
//!
//! | Type | Wire format |
//! |------|-------------|
//! | [`Signer`] | `value:signature` |
//! | [`TimestampSigner`] | `value:ts:signature` |
//! | [`JsonSigner`] | `"base64url(json):ts:signature"` |
//!
//! Each layer owns the one beneath it and calls it explicitly. The digest is
//! `HMAC-SHA1(SHA1(salt + "signer" + key), value)`, rendered as 27 characters
//! of unpadded URL-safe base64; `ts` is the signing time in base62.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): codecs, digest and the three signers
//! - **Ports Layer** (`ports/`): `TokenSigningApi` and `TimeSource`
//! - **Service Layer** (`service.rs`): `SigningService` wiring one configured stack
//!
//! ## Security Notes
//!
//! - Signatures are compared in constant time on their decoded bytes
//! - This crate signs; it does not encrypt. Payloads are readable by anyone
//! - What to do on failure (redirect, 401, ...) is the caller's decision

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::base62::Base62Alphabet;
pub use domain::digest::{constant_time_eq, salted_hmac};
pub use domain::entities::{SecretKey, DEFAULT_SEPARATOR, DIGEST_LEN};
pub use domain::errors::SigningError;
pub use domain::json::JsonSigner;
pub use domain::signer::Signer;
pub use domain::timestamp::TimestampSigner;
pub use ports::inbound::TokenSigningApi;
pub use ports::outbound::{FixedTimeSource, SystemTimeSource, TimeSource, UnixSeconds};
pub use service::SigningService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
