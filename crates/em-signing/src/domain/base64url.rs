//! URL-safe base64 without padding.
//!
//! Used for raw digest bytes and for JSON payload bytes. Decoding accepts
//! both the unpadded form produced here and padded input from other
//! encoders; the padding length is implied by the input length.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use super::errors::SigningError;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes with the `-`/`_` alphabet and no trailing `=`.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(bytes)
}

/// Decode URL-safe base64, with or without padding.
///
/// # Errors
///
/// Returns `SigningError::Base64Decode` for characters outside the URL-safe
/// alphabet (including `+` and `/`) or an impossible input length.
pub fn decode(encoded: &str) -> Result<Vec<u8>, SigningError> {
    URL_SAFE_LENIENT
        .decode(encoded)
        .map_err(|e| SigningError::Base64Decode(e.to_string()))
}
