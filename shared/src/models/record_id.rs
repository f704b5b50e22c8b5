//! Record identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefix carried by every locally synthesized id
pub const SYNTHETIC_PREFIX: &str = "local-";

/// Identifier of a normalized record
///
/// Server ids are stringified on normalization so that `7` and `"7"` compare
/// equal. A `Synthetic` id is minted when a payload carries no usable id; it
/// is unique enough to key a collection during one session but is never
/// sent back to the server as if it were real.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Server(String),
    Synthetic(String),
}

impl RecordId {
    /// Server-assigned id
    pub fn server(id: impl Into<String>) -> Self {
        Self::Server(id.into())
    }

    /// Mint a new synthetic id
    pub fn synthetic() -> Self {
        Self::Synthetic(format!("{}{}", SYNTHETIC_PREFIX, crate::util::snowflake_id()))
    }

    /// Stringified form used for every comparison
    pub fn as_str(&self) -> &str {
        match self {
            Self::Server(id) | Self::Synthetic(id) => id,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }

    /// Compare against a raw id from a caller or route parameter
    pub fn matches(&self, other: &str) -> bool {
        self.as_str() == other.trim()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.starts_with(SYNTHETIC_PREFIX) {
            Ok(Self::Synthetic(raw))
        } else {
            Ok(Self::Server(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_ids_are_tagged() {
        let id = RecordId::synthetic();
        assert!(id.is_synthetic());
        assert!(id.as_str().starts_with(SYNTHETIC_PREFIX));
        assert!(!RecordId::server("12").is_synthetic());
    }

    #[test]
    fn test_matches_stringified() {
        assert!(RecordId::server("7").matches("7"));
        assert!(RecordId::server("7").matches(" 7 "));
        assert!(!RecordId::server("7").matches("70"));
    }

    #[test]
    fn test_serde_keeps_tag() {
        let id = RecordId::synthetic();
        let json = serde_json::to_string(&id).unwrap();
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let server: RecordId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(server, RecordId::server("42"));
    }
}
