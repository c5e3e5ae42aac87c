//! Pin pipeline services
//!
//! Normalizer -> router -> per-kind handler -> gate, platform, store, announcer.

pub mod authorization;
pub mod context;
pub mod error;
pub mod handlers;
pub mod normalizer;
pub mod pinboard;
pub mod policy;
pub mod router;

#[cfg(test)]
pub(crate) mod mocks;

// Re-export all services for convenience
pub use authorization::{ActorCapabilities, AuthorizationGate, PinAction};
pub use context::{PinSettings, ServiceContext, ServiceContextBuilder};
pub use error::{
    ServiceError, ServiceResult, SkipReason, StoreFailure, TransitionError, TransitionOutcome,
};
pub use handlers::{
    EventHandler, MessageDeletedHandler, PinAddedHandler, PinRemovedHandler,
    ReactionsClearedHandler,
};
pub use normalizer::{EventNormalizer, NormalizeError};
pub use pinboard::PinboardAnnouncer;
pub use policy::RolePolicy;
pub use router::EventRouter;
