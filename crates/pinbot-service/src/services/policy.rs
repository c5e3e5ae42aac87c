//! Role-based authorization policy
//!
//! - pin: administrators, or holders of a configured pin role
//! - unpin: administrators, or the member who made the tracked pin;
//!   untracked pins fall back to the pin rule

use std::sync::Arc;

use async_trait::async_trait;
use pinbot_core::entities::{AuthorizationRequest, CanRemovePinRequest};
use pinbot_core::traits::{AuthorizationPolicy, PinStore, RepoResult};
use pinbot_core::value_objects::Snowflake;
use tracing::{debug, instrument};

/// Authorization policy driven by `PIN_ROLE_IDS`
pub struct RolePolicy {
    pin_role_ids: Vec<Snowflake>,
    store: Arc<dyn PinStore>,
}

impl RolePolicy {
    /// Create a new RolePolicy
    pub fn new(pin_role_ids: Vec<Snowflake>, store: Arc<dyn PinStore>) -> Self {
        Self {
            pin_role_ids,
            store,
        }
    }

    fn may_pin(&self, request: &AuthorizationRequest) -> bool {
        request.is_admin || request.has_any_role(&self.pin_role_ids)
    }
}

#[async_trait]
impl AuthorizationPolicy for RolePolicy {
    #[instrument(skip_all, fields(user_id = %request.user_id))]
    async fn is_authorized_to_pin(&self, request: &AuthorizationRequest) -> RepoResult<bool> {
        Ok(self.may_pin(request))
    }

    #[instrument(skip_all, fields(user_id = %request.request.user_id, message_id = %request.message_id))]
    async fn is_authorized_to_unpin(&self, request: &CanRemovePinRequest) -> RepoResult<bool> {
        if request.request.is_admin {
            return Ok(true);
        }

        match self.store.find_active(request.message_id).await? {
            Some(record) => Ok(record.is_pinned_by(request.request.user_id)),
            None => {
                debug!("No tracked pin, applying pin rule");
                Ok(self.may_pin(&request.request))
            }
        }
    }
}

impl std::fmt::Debug for RolePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RolePolicy")
            .field("pin_role_ids", &self.pin_role_ids)
            .finish()
    }
}
