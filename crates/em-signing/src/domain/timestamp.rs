//! # Timestamped Signer
//!
//! Embeds the signing time ahead of the signature:
//!
//! ```text
//! value:base62(now):signature-over("value:base62(now)")
//! ```
//!
//! The inner [`Signer`] does all cryptographic work; this layer only adds and
//! strips the timestamp and enforces the optional maximum age.

use tracing::debug;

use super::base62::Base62Alphabet;
use super::entities::SecretKey;
use super::errors::SigningError;
use super::signer::Signer;
use crate::ports::outbound::{SystemTimeSource, TimeSource, UnixSeconds};

/// Signs values together with the time they were signed.
#[derive(Clone, Debug)]
pub struct TimestampSigner<T: TimeSource = SystemTimeSource> {
    signer: Signer,
    clock: T,
    alphabet: Base62Alphabet,
}

impl TimestampSigner<SystemTimeSource> {
    /// Create a signer reading the system clock.
    pub fn new(key: impl Into<SecretKey>, salt: impl Into<String>) -> Self {
        Self::from_signer(Signer::new(key, salt), SystemTimeSource)
    }
}

impl<T: TimeSource> TimestampSigner<T> {
    /// Wrap an existing signer with an explicit clock.
    pub fn from_signer(signer: Signer, clock: T) -> Self {
        Self {
            signer,
            clock,
            alphabet: Base62Alphabet::default(),
        }
    }

    /// Swap the clock, keeping key, salt and separator.
    pub fn with_clock<U: TimeSource>(self, clock: U) -> TimestampSigner<U> {
        TimestampSigner {
            signer: self.signer,
            clock,
            alphabet: self.alphabet,
        }
    }

    /// Choose the base62 ordering used for the timestamp.
    pub fn with_alphabet(mut self, alphabet: Base62Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// The wrapped plain signer.
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// The clock this signer reads.
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Sign `value` stamped with the current time.
    pub fn sign(&self, value: &str) -> String {
        let timestamp = self.alphabet.encode(self.clock.now());
        let stamped = format!("{}{}{}", value, self.signer.separator(), timestamp);
        self.signer.sign(&stamped)
    }

    /// Verify `signed` and return the value it carries.
    ///
    /// # Errors
    ///
    /// Everything [`Signer::unsign`] returns, plus:
    /// - `SigningError::SeparatorNotFound` - no timestamp inside the signed part
    /// - `SigningError::InvalidTimestamp` - timestamp is not base62
    /// - `SigningError::Expired` - older than `max_age` seconds
    pub fn unsign<'a>(
        &self,
        signed: &'a str,
        max_age: Option<u64>,
    ) -> Result<&'a str, SigningError> {
        self.unsign_with_timestamp(signed, max_age)
            .map(|(value, _)| value)
    }

    /// Like [`unsign`](Self::unsign), but also returns the embedded timestamp.
    pub fn unsign_with_timestamp<'a>(
        &self,
        signed: &'a str,
        max_age: Option<u64>,
    ) -> Result<(&'a str, UnixSeconds), SigningError> {
        let stamped = self.signer.unsign(signed)?;
        let (value, encoded_ts) = self.signer.split(stamped)?;
        let timestamp = self.alphabet.decode(encoded_ts)?;

        if let Some(max_age) = max_age {
            // Timestamps from the future count as brand new.
            let age = self.clock.now().saturating_sub(timestamp);
            if age > max_age {
                debug!(age, max_age, "Rejecting expired signature");
                return Err(SigningError::Expired { age, max_age });
            }
        }

        Ok((value, timestamp))
    }
}
