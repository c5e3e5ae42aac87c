//! Channel permission overwrites and effective-permission computation

use serde::{Deserialize, Serialize};
use wire::OverwriteKindRepr;

use super::{Permissions, Snowflake};

/// What an overwrite targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OverwriteKindRepr", into = "OverwriteKindRepr")]
pub enum OverwriteKind {
    Role,
    Member,
}

/// A per-channel allow/deny pair for one role or member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverwrite {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: OverwriteKind,
    #[serde(default)]
    pub allow: Permissions,
    #[serde(default)]
    pub deny: Permissions,
}

/// Everything needed to resolve a member's permissions in one channel
#[derive(Debug, Clone, Default)]
pub struct ChannelPermissionInput<'a> {
    pub guild_id: Snowflake,
    pub owner_id: Snowflake,
    pub user_id: Snowflake,
    /// Permissions of the @everyone role (its ID equals the guild ID)
    pub everyone: Permissions,
    /// Role IDs and permissions of the roles the member holds
    pub member_roles: &'a [(Snowflake, Permissions)],
    pub overwrites: &'a [PermissionOverwrite],
}

/// Compute a member's effective permissions in a channel
///
/// Order: owner, base (@everyone + roles), administrator short-circuit,
/// @everyone overwrite, aggregated role overwrites, member overwrite.
pub fn compute_channel_permissions(input: &ChannelPermissionInput<'_>) -> Permissions {
    if input.user_id == input.owner_id {
        return Permissions::ALL;
    }

    let base = input.everyone | Permissions::combine(input.member_roles.iter().map(|(_, p)| *p));
    if base.is_admin() {
        return Permissions::ALL;
    }

    let mut permissions = base;

    if let Some(everyone) = input
        .overwrites
        .iter()
        .find(|o| o.kind == OverwriteKind::Role && o.id == input.guild_id)
    {
        permissions = permissions.apply(everyone.allow, everyone.deny);
    }

    let (allow, deny) = input
        .overwrites
        .iter()
        .filter(|o| o.kind == OverwriteKind::Role && o.id != input.guild_id)
        .filter(|o| input.member_roles.iter().any(|(id, _)| *id == o.id))
        .fold((Permissions::empty(), Permissions::empty()), |(a, d), o| {
            (a | o.allow, d | o.deny)
        });
    permissions = permissions.apply(allow, deny);

    if let Some(member) = input
        .overwrites
        .iter()
        .find(|o| o.kind == OverwriteKind::Member && o.id == input.user_id)
    {
        permissions = permissions.apply(member.allow, member.deny);
    }

    permissions
}

mod wire {
    use serde::{Deserialize, Serialize};

    use super::OverwriteKind;

    /// Wire form: 0 = role, 1 = member
    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct OverwriteKindRepr(u8);

    impl From<OverwriteKindRepr> for OverwriteKind {
        fn from(repr: OverwriteKindRepr) -> Self {
            if repr.0 == 1 {
                OverwriteKind::Member
            } else {
                OverwriteKind::Role
            }
        }
    }

    impl From<OverwriteKind> for OverwriteKindRepr {
        fn from(kind: OverwriteKind) -> Self {
            match kind {
                OverwriteKind::Role => OverwriteKindRepr(0),
                OverwriteKind::Member => OverwriteKindRepr(1),
            }
        }
    }
}
