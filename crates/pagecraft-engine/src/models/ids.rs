use serde::{Deserialize, Serialize};

/// Opaque block identifier.
///
/// Ids are assigned once at creation and never reused. Documents written by
/// older editors carry short random strings; those are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh, globally unique id (UUIDv4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for compact display.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = BlockId::generate();
        let b = BlockId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_truncates_long_ids() {
        let id = BlockId::from("0123456789abcdef");
        assert_eq!(id.short(), "01234567");

        let id = BlockId::from("abc");
        assert_eq!(id.short(), "abc");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = BlockId::from("hero-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero-1\"");
    }
}
