//! Message deletion retires the pin record

use async_trait::async_trait;
use pinbot_core::events::MessageDeletedEvent;
use tracing::{debug, instrument};

use super::EventHandler;
use crate::services::context::ServiceContext;
use crate::services::error::{StoreFailure, TransitionError, TransitionOutcome};

/// Soft-deletes the record of a deleted message, regardless of who deleted it
pub struct MessageDeletedHandler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageDeletedHandler<'a> {
    /// Create a new MessageDeletedHandler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventHandler<MessageDeletedEvent> for MessageDeletedHandler<'_> {
    #[instrument(skip_all, fields(message_id = %event.message_id))]
    async fn handle(&self, event: MessageDeletedEvent) -> TransitionOutcome {
        match self.ctx.store().soft_delete_pin(event.message_id).await {
            Ok(true) => TransitionOutcome::Retired,
            Ok(false) => {
                debug!("Deleted message had no active pin");
                TransitionOutcome::NoRecord
            }
            Err(e) => {
                TransitionOutcome::Failed(TransitionError::StoreOperationFailed(StoreFailure::Error(e)))
            }
        }
    }
}
