//! Record <-> model mappers

mod pin;

pub use pin::PinInsert;
