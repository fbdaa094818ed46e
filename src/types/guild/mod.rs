//! Guilds, members, roles and permissions.

mod permissions;
mod role;

pub use self::{
    permissions::Permissions,
    role::{Role, RoleColors},
};

use crate::types::{
    channel::Channel,
    id::{
        marker::{GuildMarker, RoleMarker, UserMarker},
        Id,
    },
    user::User,
};
use serde::{Deserialize, Serialize};

/// Snapshot of a guild.
///
/// Only the fields needed for permission resolution and caching are modelled;
/// everything else Discord sends is ignored on decode.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Guild {
    pub id: Id<GuildMarker>,
    #[serde(default)]
    pub name: String,
    pub owner_id: Id<UserMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    #[serde(default)]
    pub unavailable: bool,
}

impl Guild {
    /// The implicit `@everyone` role, whose ID equals the guild's.
    pub fn everyone_role(&self) -> Option<&Role> {
        self.role(self.id.cast())
    }

    /// Look up a role by ID.
    pub fn role(&self, role_id: Id<RoleMarker>) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == role_id)
    }

    /// Highest role of a member, by hierarchy.
    pub fn highest_role(&self, member_roles: &[Id<RoleMarker>]) -> Option<&Role> {
        self.roles
            .iter()
            .filter(|role| member_roles.contains(&role.id))
            .max()
    }
}

/// Guild that is offline or that the current user was removed from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UnavailableGuild {
    pub id: Id<GuildMarker>,
    #[serde(default)]
    pub unavailable: bool,
}

/// A user's membership in a guild.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Member {
    /// Absent in MESSAGE_CREATE and similar events; always present in
    /// interactions and GUILD_MEMBER_* events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Id<RoleMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub pending: bool,
    /// Total permissions in the interaction's channel; only sent with
    /// interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

impl Member {
    /// Display name: nickname, else global name, else username.
    pub fn display_name(&self) -> Option<&str> {
        self.nick.as_deref().or_else(|| {
            self.user
                .as_ref()
                .map(|user| user.global_name.as_deref().unwrap_or(&user.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Guild, Member};
    use crate::types::id::Id;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Guild: Clone, Send, Sync);

    fn guild() -> Guild {
        serde_json::from_value(json!({
            "id": "100",
            "name": "test",
            "owner_id": "1",
            "roles": [
                { "id": "100", "name": "@everyone", "position": 0, "permissions": "1024" },
                { "id": "200", "name": "mod", "position": 2, "permissions": "8192" },
                { "id": "300", "name": "member", "position": 1, "permissions": "2048" },
            ],
        }))
        .unwrap()
    }

    #[test]
    fn finds_everyone_role() {
        let guild = guild();

        assert_eq!(guild.everyone_role().map(|r| r.name.as_str()), Some("@everyone"));
    }

    #[test]
    fn highest_role_by_position() {
        let guild = guild();
        let highest = guild.highest_role(&[Id::new(300), Id::new(200)]).unwrap();

        assert_eq!(highest.name, "mod");
        assert!(guild.highest_role(&[Id::new(999)]).is_none());
    }

    #[test]
    fn member_display_name_prefers_nick() {
        let member: Member = serde_json::from_value(json!({
            "user": { "id": "1", "username": "alice", "global_name": "Alice" },
            "nick": "ally",
            "roles": ["200"],
        }))
        .unwrap();

        assert_eq!(member.display_name(), Some("ally"));
        assert_eq!(member.roles, vec![Id::new(200)]);
        assert!(member.permissions.is_none());
    }
}
