//! # Wire Compatibility Tests
//!
//! Tokens issued by the upstream SSO provider must verify here, and tokens
//! minted here must be byte-identical to what it would produce.
//!
//! ## Test Categories
//!
//! 1. **Reference Vectors** - fixed key, salt and clock
//! 2. **Envelope Attacks** - stripped quotes, swapped layers, spliced parts
//! 3. **Sharing** - one signer used from many threads

use std::sync::Arc;
use std::thread;

use em_signing::{
    FixedTimeSource, JsonSigner, Signer, SigningError, SigningService, TimestampSigner,
    TokenSigningApi,
};
use serde_json::{json, Value};

// =============================================================================
// TEST HELPERS
// =============================================================================

const REFERENCE_TIME: u64 = 1234567890;

fn json_signer() -> JsonSigner<FixedTimeSource> {
    JsonSigner::from_signer(Signer::new("key", "salt"), FixedTimeSource::new(REFERENCE_TIME))
}

fn timestamp_signer() -> TimestampSigner<FixedTimeSource> {
    TimestampSigner::from_signer(Signer::new("key", "salt"), FixedTimeSource::new(REFERENCE_TIME))
}

// =============================================================================
// REFERENCE VECTORS
// =============================================================================

#[test]
fn plain_vector() {
    let signer = Signer::new("key", "salt");
    assert_eq!(signer.sign("blah"), "blah:64vfREBIU3Gxzazd9cCBhN8HCEw");
    assert_eq!(signer.unsign("blah:64vfREBIU3Gxzazd9cCBhN8HCEw"), Ok("blah"));
}

#[test]
fn timestamped_vector() {
    assert_eq!(
        timestamp_signer().sign("blah"),
        "blah:1ly7vk:7wHOkfroZXuN4lReDWIJF84ChJI"
    );
}

#[test]
fn json_vector() {
    let signer = json_signer();
    let signed = signer.sign(&json!({"key": "value"})).unwrap();
    assert_eq!(
        signed,
        "\"eyJrZXkiOiJ2YWx1ZSJ9:1ly7vk:aNxXIPeMX1VY_l55fmS5b4hyWvQ\""
    );
    let value: Value = signer.unsign(&signed, None).unwrap();
    assert_eq!(value, json!({"key": "value"}));
}

#[test]
fn upstream_tokens_verify_without_max_age() {
    assert_eq!(
        timestamp_signer().unsign("blah:1LY7VK:gyGYmaFz62a8UBJjm7ShqWBGgtQ", None),
        Ok("blah")
    );
    let value: Value = json_signer()
        .unsign(
            "\"eyJrZXkiOiJ2YWx1ZSJ9:1LY7VK:K7kXTwk6KiFmCcX85hwWr2vz-qk\"",
            None,
        )
        .unwrap();
    assert_eq!(value, json!({"key": "value"}));
}

#[test]
fn struct_field_order_is_preserved() {
    #[derive(serde::Serialize)]
    struct Ordered {
        zeta: u8,
        alpha: u8,
    }
    let signed = json_signer().sign(&Ordered { zeta: 1, alpha: 2 }).unwrap();
    let payload = signed.trim_matches('"').split(':').next().unwrap();
    // {"zeta":1,"alpha":2}
    assert_eq!(payload, "eyJ6ZXRhIjoxLCJhbHBoYSI6Mn0");
}

// =============================================================================
// ENVELOPE ATTACKS
// =============================================================================

#[test]
fn quotes_are_mandatory_even_for_valid_interior() {
    let signer = json_signer();
    let interior = "eyJrZXkiOiJ2YWx1ZSJ9:1ly7vk:aNxXIPeMX1VY_l55fmS5b4hyWvQ";
    assert_eq!(
        timestamp_signer().unsign(interior, None),
        Ok("eyJrZXkiOiJ2YWx1ZSJ9")
    );
    for candidate in [
        interior.to_string(),
        format!("\"{}", interior),
        format!("{}\"", interior),
        format!("'{}'", interior),
        format!(" \"{}\"", interior),
    ] {
        assert_eq!(
            signer.unsign::<Value>(&candidate, None),
            Err(SigningError::InvalidJsonEnvelope),
            "accepted {:?}",
            candidate
        );
    }
}

#[test]
fn tokens_are_bound_to_their_salt() {
    let other = Signer::new("key", "other-salt");
    assert_eq!(
        other.unsign("blah:1ly7vk:7wHOkfroZXuN4lReDWIJF84ChJI"),
        Err(SigningError::InvalidSignature)
    );
}

#[test]
fn plain_layer_accepts_timestamped_token_as_opaque_value() {
    let signer = Signer::new("key", "salt");
    assert_eq!(
        signer.unsign("blah:1ly7vk:7wHOkfroZXuN4lReDWIJF84ChJI"),
        Ok("blah:1ly7vk")
    );
}

#[test]
fn signature_splice_between_tokens_fails() {
    let signer = timestamp_signer();
    let a = signer.sign("alice");
    let b = signer.sign("bob");
    let (a_body, _) = a.rsplit_once(':').unwrap();
    let (_, b_sig) = b.rsplit_once(':').unwrap();
    assert_eq!(
        signer.unsign(&format!("{}:{}", a_body, b_sig), None),
        Err(SigningError::InvalidSignature)
    );
}

#[test]
fn expired_and_tampered_are_distinguishable() {
    let signer = json_signer();
    let token = signer.sign(&json!({"user": "alice"})).unwrap();
    signer.timestamp_signer().clock().advance(120);

    let expired = signer.unsign::<Value>(&token, Some(60)).unwrap_err();
    assert!(expired.is_expired());

    // {"user":"alice"} -> {"user":"bob"}
    let tampered = token.replace("eyJ1c2VyIjoiYWxpY2UifQ", "eyJ1c2VyIjoiYm9iIn0");
    assert_ne!(tampered, token);
    assert_eq!(
        signer.unsign::<Value>(&tampered, Some(60)),
        Err(SigningError::InvalidSignature)
    );
}

// =============================================================================
// SHARING
// =============================================================================

#[test]
fn service_is_shared_across_threads() {
    let service: Arc<dyn TokenSigningApi> = Arc::new(SigningService::with_clock(
        Signer::new("key", "salt"),
        FixedTimeSource::new(REFERENCE_TIME),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let token = service.sign_json(&json!({ "worker": i })).unwrap();
                service.unsign_json(&token, Some(0)).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), json!({ "worker": i }));
    }
}
