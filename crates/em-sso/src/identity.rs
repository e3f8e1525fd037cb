//! Identity record carried inside the SSO cookie.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The signed-in staff member.
///
/// Only `username` is required. Name fields may be absent or `null` and then
/// read as empty. Fields the provider adds beyond the four known ones are
/// kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Login name
    pub username: String,
    /// Given name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    /// Family name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    /// Display name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Any other fields of the signed record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// The identity used when no SSO secret is configured.
    pub fn debug_user() -> Self {
        Self {
            username: "debug".to_string(),
            first_name: "Debug".to_string(),
            last_name: "User".to_string(),
            name: "Debug User".to_string(),
            extra: Map::new(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
