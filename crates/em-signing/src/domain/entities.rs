//! # Domain Entities
//!
//! Key material and wire-format constants shared by every signer layer.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Separator placed between a value, its timestamp and its signature.
pub const DEFAULT_SEPARATOR: char = ':';

/// Appended to the salt when deriving the signing key.
pub const SIGNER_KEY_SUFFIX: &str = "signer";

/// Length of a raw HMAC-SHA1 digest in bytes.
pub const DIGEST_LEN: usize = 20;

/// Length of an encoded digest (base64url without padding).
pub const ENCODED_DIGEST_LEN: usize = 27;

/// Delimiter wrapped around JSON tokens.
pub const JSON_QUOTE: char = '"';

/// Raw HMAC-SHA1 output.
pub type Digest = [u8; DIGEST_LEN];

/// Shared secret used to derive per-salt signing keys.
///
/// The bytes are wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Create from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the key has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecretKey {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for SecretKey {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for SecretKey {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; {} bytes])", self.0.len())
    }
}
