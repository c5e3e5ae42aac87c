//! Actor identity as seen at event time

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The user behind a reaction
///
/// `role_ids` is empty when the actor cannot hold roles (not a guild member).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Snowflake,
    pub is_admin: bool,
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
}

impl UserRef {
    /// Create a new UserRef
    pub fn new(id: Snowflake, is_admin: bool, role_ids: Vec<Snowflake>) -> Self {
        Self {
            id,
            is_admin,
            role_ids,
        }
    }

    /// Mention markup for this user
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}
