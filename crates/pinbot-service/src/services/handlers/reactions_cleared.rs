//! Reactions-cleared events are acknowledged and dropped

use async_trait::async_trait;
use pinbot_core::events::ReactionsClearedEvent;
use tracing::debug;

use super::EventHandler;
use crate::services::error::TransitionOutcome;

/// Explicit no-op: clearing reactions never changes pin state
#[derive(Debug, Default)]
pub struct ReactionsClearedHandler;

impl ReactionsClearedHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler<ReactionsClearedEvent> for ReactionsClearedHandler {
    async fn handle(&self, event: ReactionsClearedEvent) -> TransitionOutcome {
        debug!(
            message_id = %event.message_id,
            single_emoji = event.emoji.is_some(),
            "Reactions cleared, pin state unchanged"
        );
        TransitionOutcome::Ignored
    }
}
