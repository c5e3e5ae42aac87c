//! Reaction-removed path: unpin, retire record, announce

use async_trait::async_trait;
use pinbot_core::events::ReactionEvent;
use tracing::{info, instrument};

use super::{announce, EventHandler};
use crate::services::authorization::{AuthorizationGate, PinAction};
use crate::services::context::ServiceContext;
use crate::services::error::{SkipReason, StoreFailure, TransitionError, TransitionOutcome};

/// Unpins a message when an authorized actor removes the pin emoji
pub struct PinRemovedHandler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PinRemovedHandler<'a> {
    /// Create a new PinRemovedHandler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventHandler<ReactionEvent> for PinRemovedHandler<'_> {
    #[instrument(skip_all, fields(message_id = %event.message.id, actor_id = %event.actor.id))]
    async fn handle(&self, event: ReactionEvent) -> TransitionOutcome {
        let ReactionEvent {
            actor,
            message,
            emoji,
            ..
        } = event;

        if !message.pinned {
            return TransitionOutcome::Skipped(SkipReason::NotPinned);
        }
        if !emoji.matches(self.ctx.settings().pin_emoji()) {
            return TransitionOutcome::Skipped(SkipReason::NotPinEmoji);
        }

        match AuthorizationGate::new(self.ctx)
            .authorize(PinAction::Unpin, &actor, message)
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
            .unpin_message(message.channel_id, message.id)
            .await
        {
            return TransitionOutcome::Failed(TransitionError::PlatformOperationFailed(e));
        }

        match self.ctx.store().remove_pin(message.id).await {
            Ok(true) => {}
            Ok(false) => {
                return TransitionOutcome::Failed(TransitionError::StoreOperationFailed(
                    StoreFailure::NoActiveRecord,
                ));
            }
            Err(e) => {
                return TransitionOutcome::Failed(TransitionError::StoreOperationFailed(
                    StoreFailure::Error(e),
                ));
            }
        }

        info!(channel_id = %message.channel_id, "Message unpinned");

        let text = format!(
            "{} just unpinned a message in {}",
            actor.mention(),
            message.channel_mention()
        );
        announce(self.ctx, &message, &text).await;

        TransitionOutcome::Unpinned
    }
}
