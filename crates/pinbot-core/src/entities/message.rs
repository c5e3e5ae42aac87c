//! Message identity and platform-reported pin state

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Target message of a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub guild_id: Snowflake,
    /// Pin status reported by the platform when the event was observed
    pub pinned: bool,
}

impl MessageRef {
    /// Create a new MessageRef
    pub fn new(id: Snowflake, channel_id: Snowflake, guild_id: Snowflake, pinned: bool) -> Self {
        Self {
            id,
            channel_id,
            guild_id,
            pinned,
        }
    }

    /// Mention markup for the channel the message lives in
    pub fn channel_mention(&self) -> String {
        format!("<#{}>", self.channel_id)
    }
}

/// Message as returned by a platform lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub pinned: bool,
}
