//! # Domain Layer
//!
//! Pure signing logic with no I/O dependencies.
//! Layers build on each other: `signer` → `timestamp` → `json`.

pub mod base62;
pub mod base64url;
pub mod digest;
pub mod entities;
pub mod errors;
pub mod json;
pub mod signer;
pub mod timestamp;
