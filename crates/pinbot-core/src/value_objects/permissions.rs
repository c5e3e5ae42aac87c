//! Permission bitflags as the platform defines them
//!
//! Only the bits this service inspects or logs are named; unknown bits are
//! kept when parsing so that combining role permissions never loses data.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Platform permission flags
    ///
    /// Serialized as a decimal string in JSON, the way the platform sends it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS          = 1 << 1;
        const BAN_MEMBERS           = 1 << 2;
        /// Bypass all permission checks and channel overwrites
        const ADMINISTRATOR         = 1 << 3;
        const MANAGE_CHANNELS       = 1 << 4;
        const MANAGE_GUILD          = 1 << 5;
        const ADD_REACTIONS         = 1 << 6;
        const VIEW_CHANNEL          = 1 << 10;
        const SEND_MESSAGES         = 1 << 11;
        /// Delete and pin other users' messages
        const MANAGE_MESSAGES       = 1 << 13;
        const READ_MESSAGE_HISTORY  = 1 << 16;
        const MANAGE_ROLES          = 1 << 28;

        /// Every bit, including ones not named above
        const ALL = u64::MAX;

        // Keep undeclared bits from the wire
        const _ = !0;
    }
}

impl Permissions {
    /// True when the set carries the administrator bit
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Permissions::ADMINISTRATOR)
    }

    /// Check a permission; administrators pass every check
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.is_admin() || self.contains(permission)
    }

    /// Union of several permission sets (e.g. all roles of a member)
    pub fn combine<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        sets.into_iter().fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// Apply an allow/deny pair: denied bits are cleared first, then allowed bits set
    #[inline]
    #[must_use]
    pub fn apply(self, allow: Permissions, deny: Permissions) -> Self {
        (self & !deny) | allow
    }

    /// Parse from the platform's decimal string representation
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.parse::<u64>().map(Permissions::from_bits_retain)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value as u64))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Permissions::parse(value).map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}
