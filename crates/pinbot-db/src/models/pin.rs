//! Pin database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the pins table
#[derive(Debug, Clone, FromRow)]
pub struct PinModel {
    pub message_id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub pinned_by_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
