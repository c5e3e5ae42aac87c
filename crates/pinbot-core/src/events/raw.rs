//! Raw platform events - dispatch payloads before normalization
//!
//! Field names follow the platform's gateway JSON so payloads deserialize
//! directly into these types.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Emoji, Snowflake};

/// Dispatch payloads the pin pipeline consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    ReactionAdd(RawReaction),
    ReactionRemove(RawReaction),
    ReactionRemoveAll(RawReactionClear),
    ReactionRemoveEmoji(RawReactionClear),
    MessageDelete(RawMessageDelete),
    MessageDeleteBulk(RawMessageDeleteBulk),
}

impl RawEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReactionAdd(_) => "reaction_add",
            Self::ReactionRemove(_) => "reaction_remove",
            Self::ReactionRemoveAll(_) => "reaction_remove_all",
            Self::ReactionRemoveEmoji(_) => "reaction_remove_emoji",
            Self::MessageDelete(_) => "message_delete",
            Self::MessageDeleteBulk(_) => "message_delete_bulk",
        }
    }
}

/// MESSAGE_REACTION_ADD / MESSAGE_REACTION_REMOVE payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReaction {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub emoji: Emoji,
    /// Only present on reaction-add in guilds
    #[serde(default)]
    pub member: Option<RawMember>,
}

/// Partial guild member attached to a reaction-add
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMember {
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

/// MESSAGE_REACTION_REMOVE_ALL / MESSAGE_REACTION_REMOVE_EMOJI payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReactionClear {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub emoji: Option<Emoji>,
}

/// MESSAGE_DELETE payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessageDelete {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}

/// MESSAGE_DELETE_BULK payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessageDeleteBulk {
    pub ids: Vec<Snowflake>,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}
