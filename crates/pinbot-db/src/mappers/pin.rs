//! PinRecord <-> model mapper

use chrono::{DateTime, Utc};
use pinbot_core::entities::{NewPin, PinRecord};
use pinbot_core::value_objects::Snowflake;

use crate::models::PinModel;

/// Convert PinModel to PinRecord
impl From<PinModel> for PinRecord {
    fn from(model: PinModel) -> Self {
        PinRecord {
            message_id: Snowflake::new(model.message_id),
            guild_id: Snowflake::new(model.guild_id),
            channel_id: Snowflake::new(model.channel_id),
            pinned_by_user_id: Snowflake::new(model.pinned_by_user_id),
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}

/// Column values for inserting a new pin
pub struct PinInsert {
    pub message_id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub pinned_by_user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl PinInsert {
    pub fn new(pin: &NewPin) -> Self {
        Self {
            message_id: pin.message_id.into_inner(),
            guild_id: pin.guild_id.into_inner(),
            channel_id: pin.channel_id.into_inner(),
            pinned_by_user_id: pin.pinned_by_user_id.into_inner(),
            created_at: Utc::now(),
        }
    }
}
