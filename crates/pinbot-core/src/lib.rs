//! # pinbot-core
//!
//! Domain layer: pin records, reaction events, permission math and the
//! collaborator traits the pin pipeline is written against.
//! This crate has zero dependencies on infrastructure (database, HTTP, gateway).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuthorizationRequest, CanRemovePinRequest, MemberInfo, MessageInfo, MessageRef, NewPin,
    PinRecord, PinTracking, RoleInfo, UserRef,
};
pub use error::DomainError;
pub use events::{
    MessageDeletedEvent, PinEvent, RawEvent, ReactionEvent, ReactionKind, ReactionsClearedEvent,
};
pub use traits::{AnnouncementSink, AuthorizationPolicy, PinStore, PlatformClient, RepoResult};
pub use value_objects::{
    compute_channel_permissions, ChannelPermissionInput, Emoji, OverwriteKind,
    PermissionOverwrite, Permissions, Snowflake, SnowflakeParseError,
};
