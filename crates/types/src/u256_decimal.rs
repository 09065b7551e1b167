//! Serde support for `U256` fields carried as decimal strings.
//!
//! The orderbook API transports token amounts as JSON strings in base ten,
//! never as JSON numbers, to avoid precision loss in permissive parsers.

use alloy::primitives::U256;
use serde::{de, Deserializer, Serializer};
use std::fmt;

/// Serialize a `U256` as a decimal string.
pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// Deserialize a `U256` from a decimal string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    deserializer.deserialize_str(DecimalVisitor)
}

struct DecimalVisitor;

impl de::Visitor<'_> for DecimalVisitor {
    type Value = U256;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal encoded U256 string")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        U256::from_str_radix(s, 10)
            .map_err(|err| de::Error::custom(format!("failed to decode {s:?} as decimal: {err}")))
    }
}
