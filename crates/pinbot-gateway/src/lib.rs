//! # pinbot-gateway
//!
//! Platform adapters and the bot binary: the gateway WebSocket client, the
//! REST platform client and the wiring that connects them to the pin pipeline.

pub mod app;
pub mod client;
pub mod error;
pub mod events;
pub mod protocol;
pub mod rest;

pub use app::{create_router, create_store, run};
pub use client::{EventPipeline, GatewayClient, GatewayConfig};
pub use error::{GatewayError, GatewayResult};
pub use rest::HttpPlatformClient;
