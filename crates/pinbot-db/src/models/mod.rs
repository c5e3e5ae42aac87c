//! Database models

mod pin;

pub use pin::PinModel;
