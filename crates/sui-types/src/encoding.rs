//! Encoding utilities for replay JSON.
//!
//! Provides the serde adapters shared by the wire and model types: base64 for
//! raw byte payloads, and scalars whose validation is deferred until the
//! section that reads them is interpreted.

use std::fmt;

use serde::{Deserialize, Deserializer};

// =============================================================================
// Base64 Encoding/Decoding
// =============================================================================

/// Encode bytes to base64 string.
pub fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Serde adapter: `Vec<u8>` as a base64 string.
pub mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(&s)
            .map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: `Vec<Vec<u8>>` (e.g. package modules) as a list of base64 strings.
pub mod base64_bytes_vec {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(modules: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            modules
                .iter()
                .map(|m| base64::engine::general_purpose::STANDARD.encode(m)),
        )
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .iter()
            .map(|s| {
                base64::engine::general_purpose::STANDARD
                    .decode(s)
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

// =============================================================================
// Deferred scalars
// =============================================================================

/// Text form of a JSON scalar: strings as-is, anything else as its JSON text.
fn scalar_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// An unsigned integer as it appeared on the wire, a JSON number or a decimal
/// string (the replayer emits either, depending on magnitude).
///
/// Deserialization never fails on the value itself. [`FlexU64::parse`] does
/// the validation, so a bad version or index fails only the part of the
/// document that reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FlexU64(String);

impl FlexU64 {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<u64, std::num::ParseIntError> {
        self.0.parse()
    }
}

impl From<u64> for FlexU64 {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for FlexU64 {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FlexU64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FlexU64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(|v| FlexU64(scalar_text(v)))
    }
}

/// An amount literal kept as text.
///
/// Amounts are validated later by the unit converter; the wire layer keeps
/// whatever was sent (a float or an out-of-range JSON number included) so
/// malformed values surface there as typed errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmountText(pub String);

impl AmountText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AmountText {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for AmountText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(|v| AmountText(scalar_text(v)))
    }
}

/// Deserialize helper for "marker" keys whose value carries no information.
///
/// With `#[serde(default, deserialize_with = "present")]` a missing key stays
/// `None` while a present key (even `null`) becomes `Some`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Deserialize helper for keys whose presence matters even when the value is
/// `null`: a missing key is `None`, `"key": null` is `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Address Formatting
// =============================================================================

/// Normalize an address string to short form (minimal hex digits).
///
/// Useful for display purposes.
///
/// # Examples
///
/// ```
/// use sui_replay_types::encoding::normalize_address_short;
///
/// assert_eq!(normalize_address_short("0x0000000000000000000000000000000000000000000000000000000000000002"), "0x2");
/// ```
pub fn normalize_address_short(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode() {
        assert_eq!(base64_encode(b"hello world"), "aGVsbG8gd29ybGQ=");
        assert_eq!(base64_encode(&[]), "");
    }

    #[test]
    fn test_flex_u64_accepts_number_and_string() {
        let n: FlexU64 = serde_json::from_str("42").unwrap();
        let s: FlexU64 = serde_json::from_str("\"18446744073709551615\"").unwrap();
        assert_eq!(n.parse().unwrap(), 42);
        assert_eq!(s.parse().unwrap(), u64::MAX);
    }

    #[test]
    fn test_flex_u64_defers_validation() {
        let text: FlexU64 = serde_json::from_str("\"12a\"").unwrap();
        let negative: FlexU64 = serde_json::from_str("-3").unwrap();
        let float: FlexU64 = serde_json::from_str("1.5").unwrap();
        let flag: FlexU64 = serde_json::from_str("true").unwrap();

        assert_eq!(text.as_str(), "12a");
        assert!(text.parse().is_err());
        assert!(negative.parse().is_err());
        assert_eq!(float.as_str(), "1.5");
        assert!(float.parse().is_err());
        assert!(flag.parse().is_err());
    }

    #[test]
    fn test_amount_text_keeps_literal() {
        let a: AmountText = serde_json::from_str("\"1000\"").unwrap();
        let b: AmountText = serde_json::from_str("1000").unwrap();
        let c: AmountText = serde_json::from_str("-1").unwrap();
        let d: AmountText = serde_json::from_str("1.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.as_str(), "-1");
        assert_eq!(d.as_str(), "1.5");
    }

    #[test]
    fn test_nullable_key() {
        #[derive(Deserialize)]
        struct Keys {
            #[serde(default, deserialize_with = "nullable")]
            list: Option<Option<Vec<u8>>>,
        }

        let null: Keys = serde_json::from_str(r#"{"list": null}"#).unwrap();
        let missing: Keys = serde_json::from_str("{}").unwrap();
        let full: Keys = serde_json::from_str(r#"{"list": [1]}"#).unwrap();
        assert_eq!(null.list, Some(None));
        assert_eq!(missing.list, None);
        assert_eq!(full.list, Some(Some(vec![1])));
    }

    #[test]
    fn test_present_marker() {
        #[derive(Deserialize)]
        struct Marked {
            #[serde(default, deserialize_with = "present")]
            flag: Option<serde_json::Value>,
        }

        let set: Marked = serde_json::from_str(r#"{"flag": null}"#).unwrap();
        let unset: Marked = serde_json::from_str("{}").unwrap();
        assert!(set.flag.is_some());
        assert!(unset.flag.is_none());
    }

    #[test]
    fn test_normalize_address_short() {
        assert_eq!(normalize_address_short("0x2"), "0x2");
        assert_eq!(
            normalize_address_short(
                "0x0000000000000000000000000000000000000000000000000000000000000002"
            ),
            "0x2"
        );
        assert_eq!(normalize_address_short("0x0"), "0x0");
        assert_eq!(normalize_address_short("0xABC"), "0xabc");
    }
}
