//! # pinbot-service
//!
//! Application layer: the authorization gate, pin transition handlers, the
//! event router and normalizer, and the shipped policy and announcer.

pub mod services;

pub use services::{
    ActorCapabilities, AuthorizationGate, EventHandler, EventNormalizer, EventRouter,
    MessageDeletedHandler, NormalizeError, PinAction, PinAddedHandler, PinRemovedHandler,
    PinSettings, PinboardAnnouncer, ReactionsClearedHandler, RolePolicy, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SkipReason, StoreFailure,
    TransitionError, TransitionOutcome,
};
