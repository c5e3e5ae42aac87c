//! Domain events - typed reaction and deletion events fed to the handlers

use serde::{Deserialize, Serialize};

use crate::entities::{MessageRef, UserRef};
use crate::value_objects::{Emoji, Snowflake};

/// All events the pin pipeline reacts to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PinEvent {
    ReactionAdded(ReactionEvent),
    ReactionRemoved(ReactionEvent),
    ReactionsCleared(ReactionsClearedEvent),
    MessageDeleted(MessageDeletedEvent),
}

impl PinEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionAdded(_) => "REACTION_ADDED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
            Self::ReactionsCleared(_) => "REACTIONS_CLEARED",
            Self::MessageDeleted(_) => "MESSAGE_DELETED",
        }
    }

    /// Message the event targets
    pub fn message_id(&self) -> Snowflake {
        match self {
            Self::ReactionAdded(e) | Self::ReactionRemoved(e) => e.message.id,
            Self::ReactionsCleared(e) => e.message_id,
            Self::MessageDeleted(e) => e.message_id,
        }
    }

    /// Wrap a reaction event in the variant matching its kind
    pub fn from_reaction(event: ReactionEvent) -> Self {
        match event.kind {
            ReactionKind::Added => Self::ReactionAdded(event),
            ReactionKind::Removed => Self::ReactionRemoved(event),
        }
    }
}

/// Direction of a single-user reaction change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Added,
    Removed,
}

/// One user added or removed one emoji on a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub kind: ReactionKind,
    pub actor: UserRef,
    pub message: MessageRef,
    pub emoji: Emoji,
}

/// All reactions (or all reactions of one emoji) were removed from a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionsClearedEvent {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    /// Set when only one emoji was cleared
    pub emoji: Option<Emoji>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeletedEvent {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub guild_id: Option<Snowflake>,
}
