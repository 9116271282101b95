use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identifier for a repository object.
///
/// Ids are assigned by the object repository and never interpreted by the
/// indexing core beyond equality and ordering. Freshly minted ids are UUIDv7
/// strings so they sort by creation time.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an existing identifier.
    ///
    /// Returns an error for blank ids and ids containing the `|`, `,` or `/`
    /// characters, which are delimiters in index field values.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.trim().is_empty() || id.contains(['|', ',', '/']) {
            return Err(TypeError::InvalidObjectId(id));
        }
        Ok(Self(id))
    }

    /// Mint a new time-ordered identifier (UUID v7).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ids() {
        let id = ObjectId::new("collections").unwrap();
        assert_eq!(id.as_str(), "collections");
        assert_eq!(id.to_string(), "collections");
    }

    #[test]
    fn rejects_blank_and_delimited_ids() {
        assert!(ObjectId::new("").is_err());
        assert!(ObjectId::new("   ").is_err());
        assert!(ObjectId::new("a|b").is_err());
        assert!(ObjectId::new("1,a").is_err());
        assert!(ObjectId::new("a/b").is_err());
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = ObjectId::generate();
        let b = ObjectId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn short_id_truncates() {
        let id = ObjectId::new("0123456789abcdef").unwrap();
        assert_eq!(id.short_id(), "01234567");
        let short = ObjectId::new("abc").unwrap();
        assert_eq!(short.short_id(), "abc");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ObjectId::new("work1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"work1\"");
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    proptest::proptest! {
        #[test]
        fn ids_with_delimiters_are_rejected(
            head in "[a-z0-9]{0,8}",
            delim in proptest::sample::select(vec!['|', ',', '/']),
            tail in "[a-z0-9]{0,8}",
        ) {
            let raw = format!("{head}{delim}{tail}");
            proptest::prop_assert!(ObjectId::new(raw).is_err());
        }

        #[test]
        fn plain_ids_roundtrip(raw in "[A-Za-z0-9:_.-]{1,40}") {
            let id = ObjectId::new(raw.clone()).unwrap();
            proptest::prop_assert_eq!(id.as_str(), raw.as_str());
        }
    }
}
