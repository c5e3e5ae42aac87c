//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in pinbot-core.

mod error;
mod pin;

pub use pin::PgPinStore;
