//! Hand-off from the gateway to the pin pipeline
//!
//! The gateway client runs each dispatch through the pipeline on its own
//! task so a slow platform call never stalls the socket or other messages.

use pinbot_core::events::RawEvent;
use pinbot_service::{EventNormalizer, EventRouter, TransitionOutcome};
use tracing::warn;

/// Normalizer and router shared by every spawned event task
#[derive(Debug, Clone)]
pub struct EventPipeline {
    normalizer: EventNormalizer,
    router: EventRouter,
}

impl EventPipeline {
    pub fn new(router: EventRouter) -> Self {
        Self {
            normalizer: EventNormalizer::from_context(router.context()),
            router,
        }
    }

    /// Normalize and dispatch one raw event to completion
    pub async fn process(&self, raw: RawEvent) -> Vec<TransitionOutcome> {
        let kind = raw.kind();
        match self.normalizer.normalize(raw).await {
            Ok(events) => {
                let mut outcomes = Vec::with_capacity(events.len());
                for event in events {
                    outcomes.push(self.router.dispatch(event).await);
                }
                outcomes
            }
            Err(e) => {
                warn!(kind, error = %e, "Dropping event");
                Vec::new()
            }
        }
    }
}
