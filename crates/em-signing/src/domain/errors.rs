//! # Signing Errors
//!
//! Error types for sign/unsign operations across all three signer layers.

use thiserror::Error;

/// Errors that can occur while signing or verifying a token.
///
/// Callers that only care about "verified or not" can treat every variant
/// the same way. [`SigningError::is_expired`] separates a stale token from a
/// tampered one for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The signed input contains no occurrence of the separator
    #[error("Separator {separator:?} not found in signed value")]
    SeparatorNotFound {
        /// The separator the signer was configured with
        separator: char,
    },

    /// The supplied signature does not match the recomputed digest
    #[error("Invalid signature")]
    InvalidSignature,

    /// The embedded timestamp is older than the requested maximum age
    #[error("Signature age {age} > {max_age} seconds")]
    Expired {
        /// Seconds elapsed since signing
        age: u64,
        /// Maximum age the caller accepted
        max_age: u64,
    },

    /// A JSON token is not wrapped in literal double quotes
    #[error("Signed JSON value is not wrapped in quotes")]
    InvalidJsonEnvelope,

    /// The payload is not valid URL-safe base64
    #[error("Invalid base64 payload: {0}")]
    Base64Decode(String),

    /// The decoded payload is not valid JSON (or not the requested shape)
    #[error("Invalid JSON payload: {0}")]
    JsonParse(String),

    /// The value could not be serialized to JSON
    #[error("Failed to serialize value: {0}")]
    JsonSerialize(String),

    /// The embedded timestamp is not a valid base62 number
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The separator collides with the signature or timestamp alphabet
    #[error("Separator {0:?} is part of the encoding alphabet")]
    InvalidSeparator(char),
}

impl SigningError {
    /// Whether the token verified but is too old.
    pub fn is_expired(&self) -> bool {
        matches!(self, SigningError::Expired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_message_matches_upstream_wording() {
        let err = SigningError::Expired {
            age: 120,
            max_age: 60,
        };
        assert_eq!(err.to_string(), "Signature age 120 > 60 seconds");
        assert!(err.is_expired());
    }

    #[test]
    fn test_tampering_is_not_expiry() {
        assert!(!SigningError::InvalidSignature.is_expired());
        assert!(!SigningError::SeparatorNotFound { separator: ':' }.is_expired());
    }
}
