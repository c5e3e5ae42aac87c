//! Guild member and role lookups

use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// A guild member's role assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: Snowflake,
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
}

/// A guild role and its base permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub id: Snowflake,
    #[serde(default)]
    pub permissions: Permissions,
}

impl RoleInfo {
    /// Create a new RoleInfo
    pub fn new(id: Snowflake, permissions: Permissions) -> Self {
        Self { id, permissions }
    }
}
