//! # Salted HMAC
//!
//! Key derivation and digest comparison underneath every signer.
//!
//! ## Construction
//!
//! ```text
//! derived = SHA1(key_salt || secret)
//! digest  = HMAC-SHA1(derived, value)
//! ```
//!
//! Deriving the MAC key from `salt + secret` lets one secret serve several
//! signing purposes that differ only in their salt. The output has to be
//! bit-identical to the upstream framework's, so neither step may change.

use hmac::{Hmac, Mac};
use sha1::{Digest as _, Sha1};
use subtle::ConstantTimeEq;

use super::entities::{Digest, DIGEST_LEN};

type HmacSha1 = Hmac<Sha1>;

/// Compute `HMAC-SHA1(SHA1(key_salt || secret), value)`.
pub fn salted_hmac(key_salt: &str, secret: &[u8], value: &[u8]) -> Digest {
    let mut key_hash = Sha1::new();
    key_hash.update(key_salt.as_bytes());
    key_hash.update(secret);
    let derived = key_hash.finalize();

    let mut mac = HmacSha1::new_from_slice(&derived).expect("HMAC can take key of any size");
    mac.update(value);

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// Constant-time byte comparison.
///
/// SECURITY: the running time depends only on the longer operand, never on
/// where the first differing byte sits. Operands of different length are
/// padded with distinct fill bytes and compared in full, so a short or long
/// forgery costs at least as much as a same-length one and always fails.
pub fn constant_time_eq(known: &[u8], given: &[u8]) -> bool {
    let max_len = std::cmp::max(known.len(), given.len());

    let mut known_padded = vec![0u8; max_len];
    let mut given_padded = vec![0xFFu8; max_len];
    known_padded[..known.len()].copy_from_slice(known);
    given_padded[..given.len()].copy_from_slice(given);

    let lengths_equal = known.len().ct_eq(&given.len());
    let contents_equal = known_padded.ct_eq(&given_padded);

    (lengths_equal & contents_equal).into()
}
