//! Gateway dispatch event types
//!
//! Names sent in the `t` field of dispatch frames that the bot acts on.

use pinbot_core::events::RawEvent;
use serde_json::Value;
use std::fmt;

/// Dispatch events the client handles; everything else is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayEventType {
    // Connection events
    /// Sent after a successful Identify
    Ready,
    /// Sent after a successful Resume
    Resumed,

    // Reaction events
    MessageReactionAdd,
    MessageReactionRemove,
    MessageReactionRemoveAll,
    MessageReactionRemoveEmoji,

    // Message events
    MessageDelete,
    MessageDeleteBulk,
}

impl GatewayEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Resumed => "RESUMED",
            Self::MessageReactionAdd => "MESSAGE_REACTION_ADD",
            Self::MessageReactionRemove => "MESSAGE_REACTION_REMOVE",
            Self::MessageReactionRemoveAll => "MESSAGE_REACTION_REMOVE_ALL",
            Self::MessageReactionRemoveEmoji => "MESSAGE_REACTION_REMOVE_EMOJI",
            Self::MessageDelete => "MESSAGE_DELETE",
            Self::MessageDeleteBulk => "MESSAGE_DELETE_BULK",
        }
    }

    /// Parse an event type from its dispatch name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "RESUMED" => Some(Self::Resumed),
            "MESSAGE_REACTION_ADD" => Some(Self::MessageReactionAdd),
            "MESSAGE_REACTION_REMOVE" => Some(Self::MessageReactionRemove),
            "MESSAGE_REACTION_REMOVE_ALL" => Some(Self::MessageReactionRemoveAll),
            "MESSAGE_REACTION_REMOVE_EMOJI" => Some(Self::MessageReactionRemoveEmoji),
            "MESSAGE_DELETE" => Some(Self::MessageDelete),
            "MESSAGE_DELETE_BULK" => Some(Self::MessageDeleteBulk),
            _ => None,
        }
    }

    /// Decode the payload of a pin-relevant dispatch
    ///
    /// Returns `Ok(None)` for connection events, which the client handles itself.
    pub fn decode(self, data: Value) -> Result<Option<RawEvent>, serde_json::Error> {
        let event = match self {
            Self::Ready | Self::Resumed => return Ok(None),
            Self::MessageReactionAdd => RawEvent::ReactionAdd(serde_json::from_value(data)?),
            Self::MessageReactionRemove => RawEvent::ReactionRemove(serde_json::from_value(data)?),
            Self::MessageReactionRemoveAll => {
                RawEvent::ReactionRemoveAll(serde_json::from_value(data)?)
            }
            Self::MessageReactionRemoveEmoji => {
                RawEvent::ReactionRemoveEmoji(serde_json::from_value(data)?)
            }
            Self::MessageDelete => RawEvent::MessageDelete(serde_json::from_value(data)?),
            Self::MessageDeleteBulk => RawEvent::MessageDeleteBulk(serde_json::from_value(data)?),
        };
        Ok(Some(event))
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
