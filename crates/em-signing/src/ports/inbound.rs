//! # Inbound Ports (Driving Ports / API)
//!
//! The trait collaborators depend on instead of a concrete signer stack.

use serde_json::Value;

use crate::domain::errors::SigningError;

/// Token signing API.
///
/// Object safe, so callers can hold an `Arc<dyn TokenSigningApi>`.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait TokenSigningApi: Send + Sync {
    // =========================================================================
    // Plain Signatures
    // =========================================================================

    /// Sign a string: `value:signature`.
    fn sign_value(&self, value: &str) -> String;

    /// Verify `value:signature` and return `value`.
    fn unsign_value(&self, signed: &str) -> Result<String, SigningError>;

    // =========================================================================
    // Timestamped Signatures
    // =========================================================================

    /// Sign a string with the current time: `value:ts:signature`.
    fn sign_timestamped(&self, value: &str) -> String;

    /// Verify `value:ts:signature`, enforcing `max_age` seconds if given.
    fn unsign_timestamped(&self, signed: &str, max_age: Option<u64>)
        -> Result<String, SigningError>;

    // =========================================================================
    // JSON Tokens
    // =========================================================================

    /// Sign a JSON value: `"payload:ts:signature"`.
    fn sign_json(&self, value: &Value) -> Result<String, SigningError>;

    /// Verify a quoted JSON token and return its payload.
    ///
    /// This is the entry point for verifying the upstream SSO cookie.
    fn unsign_json(&self, signed: &str, max_age: Option<u64>) -> Result<Value, SigningError>;
}
