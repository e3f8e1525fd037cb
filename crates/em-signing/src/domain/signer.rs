//! # Signer
//!
//! The base layer: `value + sep + base64url(salted_hmac(salt + "signer", key, value))`.
//!
//! ## Security Notes
//!
//! - Verification splits at the LAST separator, so values may contain it.
//! - Digests are compared in constant time on their decoded bytes.

use super::base64url;
use super::digest::{constant_time_eq, salted_hmac};
use super::entities::{SecretKey, DEFAULT_SEPARATOR, SIGNER_KEY_SUFFIX};
use super::errors::SigningError;

/// Signs and verifies single string values.
///
/// Immutable after construction; share it freely between threads.
#[derive(Clone, Debug)]
pub struct Signer {
    key: SecretKey,
    salt: String,
    sep: char,
}

impl Signer {
    /// Create a signer with the default `:` separator.
    pub fn new(key: impl Into<SecretKey>, salt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            salt: salt.into(),
            sep: DEFAULT_SEPARATOR,
        }
    }

    /// Replace the separator.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::InvalidSeparator` if `sep` can appear inside an
    /// encoded signature or timestamp, which would make the split ambiguous.
    pub fn with_separator(mut self, sep: char) -> Result<Self, SigningError> {
        if sep.is_ascii_alphanumeric() || matches!(sep, '-' | '_' | '=') {
            return Err(SigningError::InvalidSeparator(sep));
        }
        self.sep = sep;
        Ok(self)
    }

    /// The configured separator.
    pub fn separator(&self) -> char {
        self.sep
    }

    /// The configured salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    fn digest(&self, value: &str) -> [u8; 20] {
        let key_salt = format!("{}{}", self.salt, SIGNER_KEY_SUFFIX);
        salted_hmac(&key_salt, self.key.as_bytes(), value.as_bytes())
    }

    /// Encoded signature for `value`.
    pub fn signature(&self, value: &str) -> String {
        base64url::encode(&self.digest(value))
    }

    /// Append the separator and signature to `value`.
    pub fn sign(&self, value: &str) -> String {
        format!("{}{}{}", value, self.sep, self.signature(value))
    }

    /// Split at the last separator.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::SeparatorNotFound` if `signed` has no separator.
    pub fn split<'a>(&self, signed: &'a str) -> Result<(&'a str, &'a str), SigningError> {
        signed
            .rsplit_once(self.sep)
            .ok_or(SigningError::SeparatorNotFound {
                separator: self.sep,
            })
    }

    /// Verify `signed` and return the value it carries.
    ///
    /// # Errors
    ///
    /// - `SigningError::SeparatorNotFound` - no separator in `signed`
    /// - `SigningError::InvalidSignature` - signature does not match, or is
    ///   not decodable at all
    pub fn unsign<'a>(&self, signed: &'a str) -> Result<&'a str, SigningError> {
        let (value, sig) = self.split(signed)?;
        let expected = self.digest(value);

        // A signature that doesn't decode is just another wrong signature.
        let given = base64url::decode(sig).map_err(|_| SigningError::InvalidSignature)?;

        if constant_time_eq(&expected, &given) {
            Ok(value)
        } else {
            Err(SigningError::InvalidSignature)
        }
    }
}
