//! # JSON Signer
//!
//! Signs structured values, matching the upstream SSO cookie format:
//!
//! ```text
//! "base64url(JSON):base62(ts):signature"
//! ```
//!
//! The enclosing double quotes belong to the wire format. They are not JSON
//! string quoting and the interior is not escaped.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::base62::Base62Alphabet;
use super::base64url;
use super::entities::{SecretKey, JSON_QUOTE};
use super::errors::SigningError;
use super::signer::Signer;
use super::timestamp::TimestampSigner;
use crate::ports::outbound::{SystemTimeSource, TimeSource};

/// Signs and verifies JSON-serializable values.
#[derive(Clone, Debug)]
pub struct JsonSigner<T: TimeSource = SystemTimeSource> {
    inner: TimestampSigner<T>,
}

impl JsonSigner<SystemTimeSource> {
    /// Create a signer reading the system clock.
    pub fn new(key: impl Into<SecretKey>, salt: impl Into<String>) -> Self {
        Self::from_timestamp_signer(TimestampSigner::new(key, salt))
    }
}

impl<T: TimeSource> JsonSigner<T> {
    /// Wrap an existing timestamp signer.
    pub fn from_timestamp_signer(inner: TimestampSigner<T>) -> Self {
        Self { inner }
    }

    /// Build from a plain signer and a clock.
    pub fn from_signer(signer: Signer, clock: T) -> Self {
        Self::from_timestamp_signer(TimestampSigner::from_signer(signer, clock))
    }

    /// Swap the clock.
    pub fn with_clock<U: TimeSource>(self, clock: U) -> JsonSigner<U> {
        JsonSigner {
            inner: self.inner.with_clock(clock),
        }
    }

    /// Choose the base62 ordering used for the timestamp.
    pub fn with_alphabet(self, alphabet: Base62Alphabet) -> Self {
        Self {
            inner: self.inner.with_alphabet(alphabet),
        }
    }

    /// The wrapped timestamp signer.
    pub fn timestamp_signer(&self) -> &TimestampSigner<T> {
        &self.inner
    }

    /// Serialize, encode, timestamp-sign and quote `value`.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::JsonSerialize` if `value` has no JSON form
    /// (for example a map with non-string keys).
    pub fn sign<V: Serialize + ?Sized>(&self, value: &V) -> Result<String, SigningError> {
        let json =
            serde_json::to_vec(value).map_err(|e| SigningError::JsonSerialize(e.to_string()))?;
        let signed = self.inner.sign(&base64url::encode(&json));
        Ok(format!("{JSON_QUOTE}{signed}{JSON_QUOTE}"))
    }

    /// Verify a quoted token and deserialize its payload.
    ///
    /// Use `serde_json::Value` as `V` to accept any JSON shape.
    ///
    /// # Errors
    ///
    /// - `SigningError::InvalidJsonEnvelope` - missing leading or trailing quote
    /// - everything [`TimestampSigner::unsign`] returns
    /// - `SigningError::Base64Decode` - payload is not base64url
    /// - `SigningError::JsonParse` - payload is not JSON, or not a `V`
    pub fn unsign<V: DeserializeOwned>(
        &self,
        signed: &str,
        max_age: Option<u64>,
    ) -> Result<V, SigningError> {
        let interior = strip_quotes(signed).ok_or(SigningError::InvalidJsonEnvelope)?;
        let payload = self.inner.unsign(interior, max_age)?;
        let json = base64url::decode(payload)?;
        serde_json::from_slice(&json).map_err(|e| SigningError::JsonParse(e.to_string()))
    }
}

/// Interior of `"…"`, if both quotes are present.
///
/// A single `"` is not an envelope: its first and last character coincide.
fn strip_quotes(signed: &str) -> Option<&str> {
    signed
        .strip_prefix(JSON_QUOTE)
        .and_then(|rest| rest.strip_suffix(JSON_QUOTE))
}
