//! Gateway dispatch events

mod event_types;

pub use event_types::GatewayEventType;
