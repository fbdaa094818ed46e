use crate::types::{
    guild::Permissions,
    id::{marker::RoleMarker, Id},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Role within a guild.
///
/// The role whose ID equals its guild's ID is the implicit `@everyone` role.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Role {
    pub id: Id<RoleMarker>,
    #[serde(default)]
    pub name: String,
    /// Integer rank; higher positions take precedence.
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub color: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<RoleColors>,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
    #[serde(default)]
    pub flags: u64,
}

impl Role {
    /// Placeholder carrying only the role's ID.
    pub fn stub(id: Id<RoleMarker>) -> Self {
        Self {
            id,
            name: String::new(),
            position: 0,
            permissions: Permissions::empty(),
            color: 0,
            colors: None,
            hoist: false,
            managed: false,
            mentionable: false,
            icon: None,
            unicode_emoji: None,
            flags: 0,
        }
    }

    /// Mention string, e.g. `<@&123>`.
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

impl Ord for Role {
    /// Compare two roles by hierarchy.
    ///
    /// Position decides first; on a tie the role with the lower ID (the older
    /// role) ranks higher, which is how the Discord client sorts them.
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then(other.id.get().cmp(&self.id.get()))
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Gradient colors of a role.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RoleColors {
    pub primary_color: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary_color: Option<u32>,
}
