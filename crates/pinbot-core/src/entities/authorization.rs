//! Authorization requests handed to the policy evaluator

use serde::{Deserialize, Serialize};

use super::{MessageRef, UserRef};
use crate::value_objects::Snowflake;

/// May this actor pin this message?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub is_admin: bool,
    pub user_id: Snowflake,
    /// Empty when the actor cannot hold roles
    pub role_ids: Vec<Snowflake>,
    pub message: MessageRef,
}

impl AuthorizationRequest {
    /// Build a request for an actor acting on a message
    pub fn for_actor(actor: &UserRef, message: MessageRef) -> Self {
        Self {
            is_admin: actor.is_admin,
            user_id: actor.id,
            role_ids: actor.role_ids.clone(),
            message,
        }
    }

    /// Check whether the actor holds any of the given roles
    pub fn has_any_role(&self, roles: &[Snowflake]) -> bool {
        self.role_ids.iter().any(|r| roles.contains(r))
    }
}

/// May this actor unpin this message?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanRemovePinRequest {
    pub request: AuthorizationRequest,
    pub message_id: Snowflake,
}

impl CanRemovePinRequest {
    /// Wrap an add-request for the message being unpinned
    pub fn new(request: AuthorizationRequest) -> Self {
        let message_id = request.message.id;
        Self {
            request,
            message_id,
        }
    }
}
