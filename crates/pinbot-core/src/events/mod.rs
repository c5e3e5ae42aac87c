//! Domain events and the raw platform payloads they are built from

mod domain_event;
mod raw;

pub use domain_event::{
    MessageDeletedEvent, PinEvent, ReactionEvent, ReactionKind, ReactionsClearedEvent,
};
pub use raw::{
    RawEvent, RawMember, RawMessageDelete, RawMessageDeleteBulk, RawReaction, RawReactionClear,
};
