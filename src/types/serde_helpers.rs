//! Custom serde helpers for Indodax's quirky serialization formats.
//!
//! The API is inconsistent about scalar representations: the same field can
//! arrive as a JSON number in one response and a quoted string in another
//! (`"success": 1` vs `"success": "1"`, unix times as `"1621355222"`).
//! These modules absorb that variance so response types can use plain
//! integer fields.

use std::fmt;

use serde::{Deserializer, Serializer, de};

/// Serialize/deserialize an `i64` that may arrive as a number or a string.
///
/// # Example
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use indodax_api_client::types::serde_helpers::stringly_int;
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Response {
///     #[serde(with = "stringly_int")]
///     server_time: i64,
/// }
///
/// let quoted: Response = serde_json::from_str(r#"{"server_time":"1621355222"}"#).unwrap();
/// let plain: Response = serde_json::from_str(r#"{"server_time":1621355222}"#).unwrap();
/// assert_eq!(quoted, plain);
/// ```
pub mod stringly_int {
    use super::*;

    /// Serialize as a plain JSON number.
    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*value)
    }

    /// Deserialize from a JSON number or a quoted decimal string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringlyIntVisitor;

        impl de::Visitor<'_> for StringlyIntVisitor {
            type Value = i64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer or a string containing an integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
                Ok(v)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
                i64::try_from(v).map_err(|_| E::custom("integer out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(StringlyIntVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(with = "super::stringly_int")]
        value: i64,
    }

    #[test]
    fn test_stringly_int_from_number() {
        let probe: Probe = serde_json::from_str(r#"{"value":1}"#).unwrap();
        assert_eq!(probe.value, 1);
    }

    #[test]
    fn test_stringly_int_from_string() {
        let probe: Probe = serde_json::from_str(r#"{"value":"1621355222"}"#).unwrap();
        assert_eq!(probe.value, 1_621_355_222);
    }

    #[test]
    fn test_stringly_int_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"value":"abc"}"#).is_err());
    }
}
