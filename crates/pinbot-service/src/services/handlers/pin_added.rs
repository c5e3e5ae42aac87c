//! Reaction-added path: pin, track, announce

use async_trait::async_trait;
use pinbot_core::entities::{NewPin, PinTracking};
use pinbot_core::events::ReactionEvent;
use tracing::{debug, info, instrument};

use super::{announce, EventHandler};
use crate::services::authorization::{AuthorizationGate, PinAction};
use crate::services::context::ServiceContext;
use crate::services::error::{SkipReason, StoreFailure, TransitionError, TransitionOutcome};

/// Pins a message when an authorized actor adds the pin emoji
pub struct PinAddedHandler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PinAddedHandler<'a> {
    /// Create a new PinAddedHandler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventHandler<ReactionEvent> for PinAddedHandler<'_> {
    #[instrument(skip_all, fields(message_id = %event.message.id, actor_id = %event.actor.id))]
    async fn handle(&self, event: ReactionEvent) -> TransitionOutcome {
        let ReactionEvent {
            actor,
            message,
            emoji,
            ..
        } = event;

        if message.pinned {
            return TransitionOutcome::Skipped(SkipReason::AlreadyPinned);
        }
        if !emoji.matches(self.ctx.settings().pin_emoji()) {
            return TransitionOutcome::Skipped(SkipReason::NotPinEmoji);
        }

        match AuthorizationGate::new(self.ctx)
            .authorize(PinAction::Pin, &actor, message)
            .await
        {
            Ok(()) => {}
            Err(TransitionError::PermissionDenied) => {
                return TransitionOutcome::Skipped(SkipReason::NotAuthorized);
            }
            Err(e) => return TransitionOutcome::Failed(e),
        }

        if let Err(e) = self
            .ctx
            .platform()
            .pin_message(message.channel_id, message.id)
            .await
        {
            return TransitionOutcome::Failed(TransitionError::PlatformOperationFailed(e));
        }

        let pin = NewPin {
            message_id: message.id,
            guild_id: message.guild_id,
            channel_id: message.channel_id,
            pinned_by_user_id: actor.id,
        };
        match self.ctx.store().add_pin(&pin).await {
            Ok(PinTracking::Created) => {}
            Ok(PinTracking::AlreadyTracked) => debug!("Pin was already tracked"),
            Err(e) => {
                return TransitionOutcome::Failed(TransitionError::StoreOperationFailed(
                    StoreFailure::Error(e),
                ));
            }
        }

        info!(channel_id = %message.channel_id, "Message pinned");

        let text = format!(
            "{} just pinned a message in {}",
            actor.mention(),
            message.channel_mention()
        );
        announce(self.ctx, &message, &text).await;

        TransitionOutcome::Pinned
    }
}
