//! Authorization gate
//!
//! One capability view of the actor feeds both the pin and the unpin
//! decision; the policy behind it stays a black box.

use pinbot_core::entities::{AuthorizationRequest, CanRemovePinRequest, MessageRef, UserRef};
use pinbot_core::value_objects::{Permissions, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::TransitionError;

/// What the actor is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinAction {
    Pin,
    Unpin,
}

impl PinAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Unpin => "unpin",
        }
    }
}

/// Resolved abilities of an actor in the channel of the target message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActorCapabilities {
    pub is_admin: bool,
    /// Empty when the actor cannot hold roles
    pub role_ids: Vec<Snowflake>,
    pub channel_permissions: Permissions,
}

impl ActorCapabilities {
    /// Derive capabilities from effective channel permissions
    pub fn new(role_ids: Vec<Snowflake>, channel_permissions: Permissions) -> Self {
        Self {
            is_admin: channel_permissions.is_admin(),
            role_ids,
            channel_permissions,
        }
    }

    /// Actor identity carried on domain events
    pub fn into_user(self, user_id: Snowflake) -> UserRef {
        UserRef::new(user_id, self.is_admin, self.role_ids)
    }
}

/// Authorization gate consulting the configured policy
pub struct AuthorizationGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationGate<'a> {
    /// Create a new AuthorizationGate
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Decide whether `actor` may perform `action` on `message`
    ///
    /// `Err(PermissionDenied)` on a negative answer,
    /// `Err(AuthorizationUnavailable)` when the policy fails.
    #[instrument(skip_all, fields(action = action.as_str(), user_id = %actor.id))]
    pub async fn authorize(
        &self,
        action: PinAction,
        actor: &UserRef,
        message: MessageRef,
    ) -> Result<(), TransitionError> {
        let request = AuthorizationRequest::for_actor(actor, message);

        let decision = match action {
            PinAction::Pin => self.ctx.policy().is_authorized_to_pin(&request).await,
            PinAction::Unpin => {
                self.ctx
                    .policy()
                    .is_authorized_to_unpin(&CanRemovePinRequest::new(request))
                    .await
            }
        };

        match decision {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!(is_admin = actor.is_admin, roles = actor.role_ids.len(), "Denied");
                Err(TransitionError::PermissionDenied)
            }
            Err(e) => Err(TransitionError::AuthorizationUnavailable(e)),
        }
    }
}
