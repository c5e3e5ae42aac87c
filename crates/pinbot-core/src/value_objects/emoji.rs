//! Reaction emoji

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Snowflake;

/// Emoji attached to a reaction
///
/// Unicode emoji have no ID; custom emoji carry both an ID and a name.
/// The name can be missing for custom emoji that were deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Emoji {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Emoji {
    /// A unicode emoji such as "📌"
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// A guild custom emoji
    pub fn custom(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    /// Compare against a designated emoji by name
    #[inline]
    pub fn matches(&self, designated: &str) -> bool {
        self.name.as_deref() == Some(designated)
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) => write!(f, "<:{name}:{id}>"),
            (Some(id), None) => write!(f, "<:_:{id}>"),
            (None, Some(name)) => f.write_str(name),
            (None, None) => f.write_str("?"),
        }
    }
}
