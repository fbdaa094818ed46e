use crate::types::{
    guild::Permissions,
    id::{
        marker::{GenericMarker, RoleMarker, UserMarker},
        Id,
    },
};
use serde::{Deserialize, Serialize};

/// Channel-scoped allow/deny delta targeting a role or a member.
///
/// The position of an overwrite in a channel's list carries no meaning;
/// precedence is decided by [`PermissionOverwriteType`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PermissionOverwrite {
    /// Role or user ID, depending on [`kind`].
    ///
    /// [`kind`]: Self::kind
    pub id: Id<GenericMarker>,
    #[serde(rename = "type")]
    pub kind: PermissionOverwriteType,
    #[serde(default)]
    pub allow: Permissions,
    #[serde(default)]
    pub deny: Permissions,
}

impl PermissionOverwrite {
    /// Overwrite targeting a role.
    pub const fn role(id: Id<RoleMarker>, allow: Permissions, deny: Permissions) -> Self {
        Self {
            id: id.cast(),
            kind: PermissionOverwriteType::Role,
            allow,
            deny,
        }
    }

    /// Overwrite targeting a single member.
    pub const fn member(id: Id<UserMarker>, allow: Permissions, deny: Permissions) -> Self {
        Self {
            id: id.cast(),
            kind: PermissionOverwriteType::Member,
            allow,
            deny,
        }
    }
}

/// Target kind of a [`PermissionOverwrite`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum PermissionOverwriteType {
    Role,
    Member,
    Unknown(u8),
}

impl From<u8> for PermissionOverwriteType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Role,
            1 => Self::Member,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<PermissionOverwriteType> for u8 {
    fn from(value: PermissionOverwriteType) -> Self {
        match value {
            PermissionOverwriteType::Role => 0,
            PermissionOverwriteType::Member => 1,
            PermissionOverwriteType::Unknown(unknown) => unknown,
        }
    }
}
