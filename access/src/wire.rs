//! Lenient decoding helpers for backend payloads.
//!
//! The backend is free to send identifiers as JSON strings or integers; the
//! console always treats them as opaque strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Uint(n) => n.to_string(),
        }
    }
}

/// Deserialize an identifier that may be a string or an integer.
///
/// # Errors
///
/// Fails for any JSON type other than string or integer.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)
        .map(RawId::into_string)
        .map_err(|_| D::Error::custom("expected string or integer id"))
}

/// Optional variant of [`deserialize_id`]; `null` maps to `None`.
///
/// # Errors
///
/// Fails for any JSON type other than null, string or integer.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer)
        .map(|raw| raw.map(RawId::into_string))
        .map_err(|_| D::Error::custom("expected string, integer or null id"))
}
