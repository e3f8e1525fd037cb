//! Fuzz target for token verification.
//!
//! Cookies arrive from the network, so every layer must reject garbage
//! without panicking.
//!
//! ## Running
//!
//! ```bash
//! cd crates/em-signing
//! cargo +nightly fuzz run fuzz_unsign
//! ```

#![no_main]

use em_signing::{FixedTimeSource, JsonSigner, Signer};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Fuzz input structure for unsign.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Candidate token
    token: String,
    /// Optional maximum age
    max_age: Option<u64>,
    /// Verification time
    now: u64,
}

fuzz_target!(|input: FuzzInput| {
    let signer = JsonSigner::from_signer(Signer::new("key", "salt"), FixedTimeSource::new(input.now));

    // Must never panic, regardless of input
    let result = signer.unsign::<Value>(&input.token, input.max_age);

    // Deterministic
    let again = signer.unsign::<Value>(&input.token, input.max_age);
    assert_eq!(result, again);

    // Anything accepted re-signs to a token that verifies again
    if let Ok(value) = result {
        let resigned = signer.sign(&value).expect("parsed JSON always serializes");
        assert!(signer.unsign::<Value>(&resigned, None).is_ok());
    }

    // The plain and timestamp layers see the same bytes
    let _ = signer.timestamp_signer().unsign(&input.token, input.max_age);
    let _ = signer.timestamp_signer().signer().unsign(&input.token);
});
