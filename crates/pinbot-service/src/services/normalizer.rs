//! Event normalizer
//!
//! Turns raw platform payloads into domain events. Reaction events get the
//! message's current pin flag and the actor's resolved capabilities; all
//! other events are mapped without lookups.

use std::sync::Arc;

use futures_util::try_join;
use pinbot_core::entities::MessageRef;
use pinbot_core::events::{
    MessageDeletedEvent, PinEvent, RawEvent, RawMember, RawReaction, RawReactionClear,
    ReactionEvent, ReactionKind, ReactionsClearedEvent,
};
use pinbot_core::traits::PlatformClient;
use pinbot_core::value_objects::{
    compute_channel_permissions, ChannelPermissionInput, Permissions, Snowflake,
};
use pinbot_core::DomainError;
use tracing::{debug, instrument, trace};

use super::authorization::ActorCapabilities;
use super::context::{PinSettings, ServiceContext};

/// Normalization errors; the event is dropped
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Platform lookup failed: {0}")]
    Platform(#[from] DomainError),
}

/// Builds domain events from raw platform events
#[derive(Clone)]
pub struct EventNormalizer {
    platform: Arc<dyn PlatformClient>,
    settings: PinSettings,
}

impl EventNormalizer {
    /// Create a new EventNormalizer
    pub fn new(platform: Arc<dyn PlatformClient>, settings: PinSettings) -> Self {
        Self { platform, settings }
    }

    /// Normalizer sharing the context's platform client and settings
    pub fn from_context(ctx: &ServiceContext) -> Self {
        Self::new(ctx.platform_handle(), ctx.settings().clone())
    }

    /// Normalize one raw event
    ///
    /// Returns no events for payloads the pipeline ignores (reactions outside
    /// a guild, reactions with another emoji) and one event per message for
    /// bulk deletions.
    #[instrument(skip_all, fields(kind = raw.kind()))]
    pub async fn normalize(&self, raw: RawEvent) -> Result<Vec<PinEvent>, NormalizeError> {
        let events = match raw {
            RawEvent::ReactionAdd(reaction) => self
                .reaction(ReactionKind::Added, reaction)
                .await?
                .into_iter()
                .collect(),
            RawEvent::ReactionRemove(reaction) => self
                .reaction(ReactionKind::Removed, reaction)
                .await?
                .into_iter()
                .collect(),
            RawEvent::ReactionRemoveAll(clear) | RawEvent::ReactionRemoveEmoji(clear) => {
                vec![cleared(clear)]
            }
            RawEvent::MessageDelete(delete) => vec![PinEvent::MessageDeleted(MessageDeletedEvent {
                message_id: delete.id,
                channel_id: delete.channel_id,
                guild_id: delete.guild_id,
            })],
            RawEvent::MessageDeleteBulk(bulk) => bulk
                .ids
                .into_iter()
                .map(|message_id| {
                    PinEvent::MessageDeleted(MessageDeletedEvent {
                        message_id,
                        channel_id: bulk.channel_id,
                        guild_id: bulk.guild_id,
                    })
                })
                .collect(),
        };
        Ok(events)
    }

    async fn reaction(
        &self,
        kind: ReactionKind,
        raw: RawReaction,
    ) -> Result<Option<PinEvent>, NormalizeError> {
        let Some(guild_id) = raw.guild_id else {
            debug!(message_id = %raw.message_id, "Ignoring reaction outside a guild");
            return Ok(None);
        };
        if !raw.emoji.matches(self.settings.pin_emoji()) {
            trace!(message_id = %raw.message_id, emoji = %raw.emoji, "Ignoring other emoji");
            return Ok(None);
        }

        let (message, capabilities) = try_join!(
            async {
                self.platform
                    .fetch_message(raw.channel_id, raw.message_id)
                    .await
                    .map_err(NormalizeError::from)
            },
            self.capabilities(guild_id, raw.channel_id, raw.user_id, raw.member.as_ref()),
        )?;

        Ok(Some(PinEvent::from_reaction(ReactionEvent {
            kind,
            actor: capabilities.into_user(raw.user_id),
            message: MessageRef::new(raw.message_id, raw.channel_id, guild_id, message.pinned),
            emoji: raw.emoji,
        })))
    }

    /// Resolve roles and effective channel permissions of the actor
    async fn capabilities(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        user_id: Snowflake,
        member: Option<&RawMember>,
    ) -> Result<ActorCapabilities, NormalizeError> {
        let role_ids = match member {
            Some(member) => member.roles.clone(),
            // Not a member: no roles, not an error
            None => self
                .platform
                .fetch_member(guild_id, user_id)
                .await?
                .map(|m| m.role_ids)
                .unwrap_or_default(),
        };

        let (owner_id, roles) = try_join!(
            self.platform.fetch_guild_owner(guild_id),
            self.platform.fetch_guild_roles(guild_id),
        )?;

        if owner_id == user_id {
            return Ok(ActorCapabilities::new(role_ids, Permissions::ALL));
        }

        let everyone = roles
            .iter()
            .find(|r| r.id == guild_id)
            .map(|r| r.permissions)
            .unwrap_or_default();
        let member_roles: Vec<(Snowflake, Permissions)> = roles
            .iter()
            .filter(|r| role_ids.contains(&r.id))
            .map(|r| (r.id, r.permissions))
            .collect();

        // Overwrites cannot take administrator away
        let base = everyone | Permissions::combine(member_roles.iter().map(|(_, p)| *p));
        let overwrites = if base.is_admin() {
            Vec::new()
        } else {
            self.platform.fetch_channel_overwrites(channel_id).await?
        };

        let permissions = compute_channel_permissions(&ChannelPermissionInput {
            guild_id,
            owner_id,
            user_id,
            everyone,
            member_roles: &member_roles,
            overwrites: &overwrites,
        });

        Ok(ActorCapabilities::new(role_ids, permissions))
    }
}

fn cleared(clear: RawReactionClear) -> PinEvent {
    PinEvent::ReactionsCleared(ReactionsClearedEvent {
        message_id: clear.message_id,
        channel_id: clear.channel_id,
        guild_id: clear.guild_id,
        emoji: clear.emoji,
    })
}

impl std::fmt::Debug for EventNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventNormalizer")
            .field("settings", &self.settings)
            .finish()
    }
}
