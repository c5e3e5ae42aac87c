//! Collaborator traits (ports) - what the pin pipeline needs from the outside
//!
//! The domain layer defines these interfaces; the store, platform client,
//! policy and announcer implementations live in the infrastructure crates.

use async_trait::async_trait;

use crate::entities::{
    AuthorizationRequest, CanRemovePinRequest, MemberInfo, MessageInfo, NewPin, PinRecord,
    PinTracking, RoleInfo,
};
use crate::error::DomainError;
use crate::value_objects::{PermissionOverwrite, Snowflake};

/// Result type for collaborator operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pin Store
// ============================================================================

/// Persistent pin records
///
/// All mutations must be idempotent and safe under concurrent duplicates
/// for the same message.
#[async_trait]
pub trait PinStore: Send + Sync {
    /// Track a pin; an existing active record yields `AlreadyTracked`
    async fn add_pin(&self, pin: &NewPin) -> RepoResult<PinTracking>;

    /// Retire the active record after an unpin; false if none was active
    async fn remove_pin(&self, message_id: Snowflake) -> RepoResult<bool>;

    /// Retire the active record of a deleted message; false if none was active
    async fn soft_delete_pin(&self, message_id: Snowflake) -> RepoResult<bool>;

    /// Find the active record for a message
    async fn find_active(&self, message_id: Snowflake) -> RepoResult<Option<PinRecord>>;
}

// ============================================================================
// Platform Client
// ============================================================================

#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Pin a message in its channel
    async fn pin_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()>;

    /// Unpin a message in its channel
    async fn unpin_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()>;

    /// Fetch a message (for its current pin flag)
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> RepoResult<MessageInfo>;

    /// Fetch a guild member; `None` when the user is not a member
    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<MemberInfo>>;

    /// Owner of a guild
    async fn fetch_guild_owner(&self, guild_id: Snowflake) -> RepoResult<Snowflake>;

    /// All roles of a guild, @everyone included
    async fn fetch_guild_roles(&self, guild_id: Snowflake) -> RepoResult<Vec<RoleInfo>>;

    /// Permission overwrites of a channel
    async fn fetch_channel_overwrites(
        &self,
        channel_id: Snowflake,
    ) -> RepoResult<Vec<PermissionOverwrite>>;

    /// Post a plain text message
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> RepoResult<()>;
}

// ============================================================================
// Authorization Policy
// ============================================================================

/// Decides who may pin and unpin
///
/// An `Err` means the decision could not be made; callers must treat it as
/// a denial.
#[async_trait]
pub trait AuthorizationPolicy: Send + Sync {
    async fn is_authorized_to_pin(&self, request: &AuthorizationRequest) -> RepoResult<bool>;

    async fn is_authorized_to_unpin(&self, request: &CanRemovePinRequest) -> RepoResult<bool>;
}

// ============================================================================
// Announcement Sink
// ============================================================================

/// Reports pin transitions for a source channel
#[async_trait]
pub trait AnnouncementSink: Send + Sync {
    async fn announce(&self, channel_id: Snowflake, text: &str) -> RepoResult<()>;
}
