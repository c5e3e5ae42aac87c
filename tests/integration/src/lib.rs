//! Integration test utilities for the pin bot
//!
//! A fake chat platform (REST API and gateway WebSocket) plus fixtures for
//! driving the full pipeline end to end.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
