//! Value objects - immutable types that represent platform concepts

mod emoji;
mod overwrite;
mod permissions;
mod snowflake;

pub use emoji::Emoji;
pub use overwrite::{
    compute_channel_permissions, ChannelPermissionInput, OverwriteKind, PermissionOverwrite,
};
pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeParseError};
