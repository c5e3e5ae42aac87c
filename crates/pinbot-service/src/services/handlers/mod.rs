//! Pin transition handlers, one per event kind

use async_trait::async_trait;
use pinbot_core::entities::MessageRef;
use tracing::warn;

use super::context::ServiceContext;
use super::error::{TransitionError, TransitionOutcome};

mod message_deleted;
mod pin_added;
mod pin_removed;
mod reactions_cleared;

pub use message_deleted::MessageDeletedHandler;
pub use pin_added::PinAddedHandler;
pub use pin_removed::PinRemovedHandler;
pub use reactions_cleared::ReactionsClearedHandler;

/// Handles one kind of domain event to a terminal outcome
///
/// Implementations never return errors; failures end in `TransitionOutcome::Failed`.
#[async_trait]
pub trait EventHandler<E>: Send + Sync
where
    E: Send + 'static,
{
    async fn handle(&self, event: E) -> TransitionOutcome;
}

/// Post a transition notice; failures are logged and swallowed
async fn announce(ctx: &ServiceContext, message: &MessageRef, text: &str) {
    if let Err(e) = ctx.announcer().announce(message.channel_id, text).await {
        let err = TransitionError::AnnouncementFailed(e);
        warn!(
            message_id = %message.id,
            channel_id = %message.channel_id,
            code = err.code(),
            error = %err,
            "Pinboard announcement failed"
        );
    }
}
