//! Event router
//!
//! Dispatches each domain event to its handler inside a per-event span and
//! logs the terminal outcome. Events are independent; the router holds no
//! per-message state.

use tracing::{debug, error, info, info_span, warn, Instrument, Level};

use super::context::ServiceContext;
use super::error::TransitionOutcome;
use super::handlers::{
    EventHandler, MessageDeletedHandler, PinAddedHandler, PinRemovedHandler,
    ReactionsClearedHandler,
};
use pinbot_core::events::PinEvent;

/// Routes domain events to the pin transition handlers
#[derive(Debug, Clone)]
pub struct EventRouter {
    ctx: ServiceContext,
}

impl EventRouter {
    /// Create a new EventRouter
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Handle one event to completion
    pub async fn dispatch(&self, event: PinEvent) -> TransitionOutcome {
        let span = info_span!(
            "pin_event",
            event_kind = event.event_type(),
            message_id = %event.message_id()
        );

        async move {
            let outcome = match event {
                PinEvent::ReactionAdded(e) => PinAddedHandler::new(&self.ctx).handle(e).await,
                PinEvent::ReactionRemoved(e) => PinRemovedHandler::new(&self.ctx).handle(e).await,
                PinEvent::ReactionsCleared(e) => ReactionsClearedHandler.handle(e).await,
                PinEvent::MessageDeleted(e) => MessageDeletedHandler::new(&self.ctx).handle(e).await,
            };
            log_outcome(&outcome);
            outcome
        }
        .instrument(span)
        .await
    }
}

fn log_outcome(outcome: &TransitionOutcome) {
    match outcome {
        TransitionOutcome::Failed(err) => {
            let level = err.level();
            if level == Level::ERROR {
                error!(code = err.code(), error = %err, "Pin transition failed");
            } else if level == Level::WARN {
                warn!(code = err.code(), error = %err, "Pin transition failed");
            } else {
                debug!(code = err.code(), error = %err, "Pin transition failed");
            }
        }
        TransitionOutcome::Skipped(reason) => {
            debug!(outcome = outcome.label(), reason = reason.as_str(), "Event skipped");
        }
        outcome if outcome.is_transition() => {
            info!(outcome = outcome.label(), "Event handled");
        }
        outcome => debug!(outcome = outcome.label(), "Event handled"),
    }
}
