//! # Base62 Timestamps
//!
//! Compact encoding of Unix timestamps embedded in timestamped tokens.
//!
//! ## Alphabet Ordering
//!
//! Two orderings exist in the wild:
//!
//! | Ordering | Symbols | `1234567890` |
//! |----------|---------|--------------|
//! | [`Base62Alphabet::LowercaseFirst`] | `0-9a-zA-Z` | `1ly7vk` |
//! | [`Base62Alphabet::UppercaseFirst`] | `0-9A-Za-z` | `1LY7VK` |
//!
//! Decoding is case-sensitive: every symbol maps to exactly one digit value of
//! the configured alphabet. Timestamps issued under the other ordering still
//! decode (to a different number) because both orderings share one symbol set,
//! so they only matter when a maximum age is enforced.

use super::errors::SigningError;

const LOWERCASE_FIRST: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const UPPERCASE_FIRST: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Symbol ordering for the base62 codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Base62Alphabet {
    /// Digits, then lowercase, then uppercase
    #[default]
    LowercaseFirst,
    /// Digits, then uppercase, then lowercase
    UppercaseFirst,
}

impl Base62Alphabet {
    fn symbols(self) -> &'static [u8; 62] {
        match self {
            Base62Alphabet::LowercaseFirst => LOWERCASE_FIRST,
            Base62Alphabet::UppercaseFirst => UPPERCASE_FIRST,
        }
    }

    fn digit_value(self, symbol: u8) -> Option<u64> {
        let value = match symbol {
            b'0'..=b'9' => symbol - b'0',
            b'a'..=b'z' => symbol - b'a' + 10,
            b'A'..=b'Z' => symbol - b'A' + 36,
            _ => return None,
        };
        // The two orderings only swap the lowercase and uppercase blocks.
        let value = match (self, value) {
            (Base62Alphabet::UppercaseFirst, 10..=35) => value + 26,
            (Base62Alphabet::UppercaseFirst, 36..=61) => value - 26,
            _ => value,
        };
        Some(u64::from(value))
    }

    /// Encode a non-negative integer.
    pub fn encode(self, mut value: u64) -> String {
        let symbols = self.symbols();
        if value == 0 {
            return "0".to_string();
        }

        let mut out = Vec::with_capacity(11);
        while value > 0 {
            out.push(symbols[(value % 62) as usize]);
            value /= 62;
        }
        out.reverse();
        out.into_iter().map(char::from).collect()
    }

    /// Decode a base62 string.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::InvalidTimestamp` for empty input, symbols
    /// outside the alphabet, or values that overflow `u64`.
    pub fn decode(self, encoded: &str) -> Result<u64, SigningError> {
        if encoded.is_empty() {
            return Err(SigningError::InvalidTimestamp("empty timestamp".to_string()));
        }

        encoded.bytes().try_fold(0u64, |acc, symbol| {
            let digit = self.digit_value(symbol).ok_or_else(|| {
                SigningError::InvalidTimestamp(format!("invalid base62 symbol {:?}", symbol as char))
            })?;
            acc.checked_mul(62)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| SigningError::InvalidTimestamp(format!("{} overflows", encoded)))
        })
    }
}
