use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Shared by every replay identifier in the archive.
pub const COMMON_PREFIX: &str = "ahRzfm91dHdpdHRlcnNnYW1lLWhyZHIVCxIIR2FtZVJvb20Y";

/// Identifier of an archived match.
///
/// The full id is kept as read; serialization writes the short form.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsnGameId(String);

impl OsnGameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id without the common prefix. Ids without the prefix are
    /// returned unchanged.
    pub fn short_id(&self) -> &str {
        self.0.strip_prefix(COMMON_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for OsnGameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_id())
    }
}

impl From<&str> for OsnGameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for OsnGameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_id())
    }
}

impl<'de> Deserialize<'de> for OsnGameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stripped() {
        let id = OsnGameId::from("ahRzfm91dHdpdHRlcnNnYW1lLWhyZHIVCxIIR2FtZVJvb20Ygame-id");
        assert_eq!(id.short_id(), "game-id");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""game-id""#);

        let decoded: OsnGameId = serde_json::from_str(r#""game-id""#).unwrap();
        assert_eq!(decoded.as_str(), "game-id");
    }

    #[test]
    fn ids_without_prefix_are_unchanged() {
        for raw in ["ggame-id", "gameidgameid", "game-id-game-gg"] {
            let id = OsnGameId::from(raw);
            assert_eq!(id.short_id(), raw);
            let encoded = serde_json::to_string(&id).unwrap();
            assert_eq!(encoded, format!("{raw:?}"));
            assert_eq!(serde_json::from_str::<OsnGameId>(&encoded).unwrap(), id);
        }
    }

    #[test]
    fn prefix_is_48_chars() {
        assert_eq!(COMMON_PREFIX.len(), 48);
    }
}
