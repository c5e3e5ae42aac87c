//! Pin record - the persisted trace of a pin made through a reaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Tracked pin
///
/// At most one active (not deleted) record exists per message.
/// Records are soft-deleted, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRecord {
    pub message_id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub pinned_by_user_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PinRecord {
    /// Build an active record from an add-pin request
    pub fn from_new(pin: &NewPin) -> Self {
        Self {
            message_id: pin.message_id,
            guild_id: pin.guild_id,
            channel_id: pin.channel_id,
            pinned_by_user_id: pin.pinned_by_user_id,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Check if the record is still active
    #[inline]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Check if the given user made this pin
    #[inline]
    pub fn is_pinned_by(&self, user_id: Snowflake) -> bool {
        self.pinned_by_user_id == user_id
    }

    /// Mark the record deleted
    pub fn retire(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }
}

/// Input for tracking a new pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPin {
    pub message_id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub pinned_by_user_id: Snowflake,
}

/// Result of tracking a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinTracking {
    /// A new active record was written
    Created,
    /// An active record already existed for the message
    AlreadyTracked,
}
