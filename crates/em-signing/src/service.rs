//! # Signing Service
//!
//! Application service implementing `TokenSigningApi` on top of one
//! configured signer stack.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`TokenSigningApi`)
//! - Reads time through the outbound port (`TimeSource`)
//! - Delegates all cryptography to the domain layer
//!
//! All three token kinds share key, salt, separator and clock, so a token
//! minted through one method only verifies through its matching method.

use serde_json::Value;
use tracing::debug;

use crate::domain::base62::Base62Alphabet;
use crate::domain::entities::SecretKey;
use crate::domain::errors::SigningError;
use crate::domain::json::JsonSigner;
use crate::domain::signer::Signer;
use crate::domain::timestamp::TimestampSigner;
use crate::ports::inbound::TokenSigningApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};

/// Signing service.
#[derive(Debug)]
pub struct SigningService<T: TimeSource = SystemTimeSource> {
    json: JsonSigner<T>,
}

impl SigningService<SystemTimeSource> {
    /// Create a service reading the system clock.
    pub fn new(key: impl Into<SecretKey>, salt: impl Into<String>) -> Self {
        Self::with_clock(Signer::new(key, salt), SystemTimeSource)
    }
}

impl<T: TimeSource> SigningService<T> {
    /// Create a service from a configured signer and clock.
    pub fn with_clock(signer: Signer, clock: T) -> Self {
        Self {
            json: JsonSigner::from_signer(signer, clock),
        }
    }

    /// Choose the base62 ordering for timestamps.
    pub fn with_alphabet(self, alphabet: Base62Alphabet) -> Self {
        Self {
            json: self.json.with_alphabet(alphabet),
        }
    }

    fn timestamped(&self) -> &TimestampSigner<T> {
        self.json.timestamp_signer()
    }

    fn plain(&self) -> &Signer {
        self.timestamped().signer()
    }

    /// The clock shared by every layer.
    pub fn clock(&self) -> &T {
        self.timestamped().clock()
    }
}

impl<T: TimeSource> TokenSigningApi for SigningService<T> {
    fn sign_value(&self, value: &str) -> String {
        self.plain().sign(value)
    }

    fn unsign_value(&self, signed: &str) -> Result<String, SigningError> {
        self.plain()
            .unsign(signed)
            .map(str::to_owned)
            .inspect_err(|e| debug!(salt = self.plain().salt(), error = %e, "Plain token rejected"))
    }

    fn sign_timestamped(&self, value: &str) -> String {
        self.timestamped().sign(value)
    }

    fn unsign_timestamped(
        &self,
        signed: &str,
        max_age: Option<u64>,
    ) -> Result<String, SigningError> {
        self.timestamped()
            .unsign(signed, max_age)
            .map(str::to_owned)
            .inspect_err(|e| {
                debug!(salt = self.plain().salt(), error = %e, "Timestamped token rejected")
            })
    }

    fn sign_json(&self, value: &Value) -> Result<String, SigningError> {
        self.json.sign(value)
    }

    fn unsign_json(&self, signed: &str, max_age: Option<u64>) -> Result<Value, SigningError> {
        self.json
            .unsign(signed, max_age)
            .inspect_err(|e| debug!(salt = self.plain().salt(), error = %e, "JSON token rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::FixedTimeSource;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> SigningService<FixedTimeSource> {
        SigningService::with_clock(Signer::new("key", "salt"), FixedTimeSource::new(1234567890))
    }

    #[test]
    fn test_reference_vectors_through_api() {
        let api: Arc<dyn TokenSigningApi> = Arc::new(service());

        assert_eq!(api.sign_value("blah"), "blah:64vfREBIU3Gxzazd9cCBhN8HCEw");
        assert_eq!(
            api.sign_timestamped("blah"),
            "blah:1ly7vk:7wHOkfroZXuN4lReDWIJF84ChJI"
        );
        assert_eq!(
            api.sign_json(&json!({"key": "value"})).unwrap(),
            r#""eyJrZXkiOiJ2YWx1ZSJ9:1ly7vk:aNxXIPeMX1VY_l55fmS5b4hyWvQ""#
        );
    }

    #[test]
    fn test_roundtrip_each_kind() {
        let s = service();
        assert_eq!(s.unsign_value(&s.sign_value("v")).unwrap(), "v");
        assert_eq!(
            s.unsign_timestamped(&s.sign_timestamped("v"), Some(0)).unwrap(),
            "v"
        );
        let token = s.sign_json(&json!([1, "two"])).unwrap();
        assert_eq!(s.unsign_json(&token, Some(0)).unwrap(), json!([1, "two"]));
    }

    #[test]
    fn test_kinds_do_not_cross_verify() {
        let s = service();
        let plain = s.sign_value("v");
        assert!(s.unsign_timestamped(&plain, None).is_err());
        assert_eq!(
            s.unsign_json(&plain, None),
            Err(SigningError::InvalidJsonEnvelope)
        );
    }

    #[test]
    fn test_clock_is_shared() {
        let s = service();
        let token = s.sign_timestamped("v");
        s.clock().advance(11);
        assert!(s.unsign_timestamped(&token, Some(10)).unwrap_err().is_expired());
    }

    #[test]
    fn test_uppercase_alphabet_service() {
        let s = service().with_alphabet(Base62Alphabet::UppercaseFirst);
        assert_eq!(
            s.sign_timestamped("blah"),
            "blah:1LY7VK:gyGYmaFz62a8UBJjm7ShqWBGgtQ"
        );
        let token = s.sign_json(&json!({"key": "value"})).unwrap();
        assert_eq!(
            token,
            r#""eyJrZXkiOiJ2YWx1ZSJ9:1LY7VK:K7kXTwk6KiFmCcX85hwWr2vz-qk""#
        );
    }
}
