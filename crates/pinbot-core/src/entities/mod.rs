//! Domain entities - core business objects

mod authorization;
mod member;
mod message;
mod pin;
mod user;

pub use authorization::{AuthorizationRequest, CanRemovePinRequest};
pub use member::{MemberInfo, RoleInfo};
pub use message::{MessageInfo, MessageRef};
pub use pin::{NewPin, PinRecord, PinTracking};
pub use user::UserRef;
