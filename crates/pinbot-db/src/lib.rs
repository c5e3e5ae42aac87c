//! # pinbot-db
//!
//! Pin record storage implementing the `PinStore` trait from `pinbot-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Record ↔ model mappers
//! - `PgPinStore` (PostgreSQL) and `MemoryPinStore` (process-local)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pinbot_db::{create_pool, ensure_schema, DatabaseConfig, PgPinStore};
//!
//! async fn example() -> Result<(), sqlx::Error> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     ensure_schema(&pool).await?;
//!     let store = PgPinStore::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use memory::MemoryPinStore;
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::PgPinStore;
pub use schema::ensure_schema;
