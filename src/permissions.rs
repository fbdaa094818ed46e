//! Effective permissions of a guild member in a channel.
//!
//! Resolution follows Discord's hierarchy:
//!
//! 1. The guild owner has every permission.
//! 2. The `@everyone` role and the member's roles are combined.
//! 3. Administrators get every permission.
//! 4. The channel's `@everyone` overwrite, then the combined role overwrites,
//!    then the member's own overwrite are applied, each clearing its denied
//!    bits before setting its allowed bits.
//! 5. Administrators get every channel permission back.
//!
//! Everything here is pure and infallible. Unknown bits are carried through.

use crate::types::{
    channel::{Channel, PermissionOverwrite, PermissionOverwriteType},
    guild::{Guild, Member, Permissions},
    id::{
        marker::{RoleMarker, UserMarker},
        Id,
    },
};

/// Permissions of `user_id` holding `member_roles` in `channel`.
///
/// `member_roles` should not include the `@everyone` role; it is always
/// applied. Role IDs not present in the guild are ignored.
pub fn member_permissions(
    guild: &Guild,
    channel: &Channel,
    user_id: Id<UserMarker>,
    member_roles: &[Id<RoleMarker>],
) -> Permissions {
    PermissionCalculator::new(guild, user_id, member_roles).in_channel(channel)
}

/// Permissions of a member in `channel`.
///
/// A member without a user object can't be matched against the owner or a
/// member overwrite; only role-based permissions are computed for them.
pub fn channel_permissions(guild: &Guild, channel: &Channel, member: &Member) -> Permissions {
    match &member.user {
        Some(user) => member_permissions(guild, channel, user.id, &member.roles),
        None => {
            let base = guild_permissions(guild, &member.roles);

            apply_overwrites(guild, &channel.permission_overwrites, None, &member.roles, base)
        }
    }
}

/// Calculator bound to one member of one guild.
///
/// ```
/// use snowcord::{
///     permissions::PermissionCalculator,
///     types::{guild::{Guild, Permissions}, id::Id},
/// };
/// # fn check(guild: &Guild, channel: &snowcord::types::channel::Channel) {
/// let roles = [Id::new(2)];
/// let calculator = PermissionCalculator::new(guild, Id::new(1), &roles);
///
/// if calculator.in_channel(channel).contains(Permissions::SEND_MESSAGES) {
///     // ...
/// }
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use = "calculators aren't useful if you don't calculate permissions"]
pub struct PermissionCalculator<'a> {
    guild: &'a Guild,
    user_id: Id<UserMarker>,
    member_roles: &'a [Id<RoleMarker>],
}

impl<'a> PermissionCalculator<'a> {
    pub const fn new(
        guild: &'a Guild,
        user_id: Id<UserMarker>,
        member_roles: &'a [Id<RoleMarker>],
    ) -> Self {
        Self {
            guild,
            user_id,
            member_roles,
        }
    }

    /// Whether the member owns the guild.
    pub fn is_owner(&self) -> bool {
        self.user_id == self.guild.owner_id
    }

    /// Guild-level permissions, ignoring any channel.
    pub fn root(&self) -> Permissions {
        if self.is_owner() {
            return Permissions::ALL;
        }

        guild_permissions(self.guild, self.member_roles)
    }

    /// Permissions within `channel`, overwrites applied.
    ///
    /// Pass the parent channel when calculating for a thread; threads have
    /// no overwrites of their own.
    pub fn in_channel(&self, channel: &Channel) -> Permissions {
        if self.is_owner() {
            return Permissions::ALL;
        }

        let base = guild_permissions(self.guild, self.member_roles);

        apply_overwrites(
            self.guild,
            &channel.permission_overwrites,
            Some(self.user_id),
            self.member_roles,
            base,
        )
    }
}

/// `@everyone` plus the member's roles, with administrator escalation.
fn guild_permissions(guild: &Guild, member_roles: &[Id<RoleMarker>]) -> Permissions {
    let mut permissions = guild
        .everyone_role()
        .map(|role| role.permissions)
        .unwrap_or_else(Permissions::empty);

    for role in &guild.roles {
        if member_roles.contains(&role.id) {
            permissions |= role.permissions;
        }
    }

    if permissions.contains(Permissions::ADMINISTRATOR) {
        permissions |= Permissions::ALL;
    }

    permissions
}

fn apply_overwrites(
    guild: &Guild,
    overwrites: &[PermissionOverwrite],
    user_id: Option<Id<UserMarker>>,
    member_roles: &[Id<RoleMarker>],
    mut permissions: Permissions,
) -> Permissions {
    // The @everyone overwrite shares the guild's ID.
    if let Some(everyone) = overwrites
        .iter()
        .find(|overwrite| overwrite.id == guild.id.cast())
    {
        permissions.remove(everyone.deny);
        permissions.insert(everyone.allow);
    }

    let mut denies = Permissions::empty();
    let mut allows = Permissions::empty();

    for overwrite in overwrites {
        if overwrite.kind == PermissionOverwriteType::Role
            && member_roles.contains(&overwrite.id.cast())
        {
            denies.insert(overwrite.deny);
            allows.insert(overwrite.allow);
        }
    }

    permissions.remove(denies);
    permissions.insert(allows);

    if let Some(user_id) = user_id {
        if let Some(member) = overwrites.iter().find(|overwrite| {
            overwrite.kind == PermissionOverwriteType::Member && overwrite.id == user_id.cast()
        }) {
            permissions.remove(member.deny);
            permissions.insert(member.allow);
        }
    }

    if permissions.contains(Permissions::ADMINISTRATOR) {
        permissions |= Permissions::ALL_CHANNEL;
    }

    permissions
}

#[cfg(test)]
mod tests {
    use super::{channel_permissions, member_permissions, PermissionCalculator};
    use crate::types::{
        channel::{Channel, PermissionOverwrite},
        guild::{Guild, Member, Permissions, Role},
        id::{
            marker::{GuildMarker, RoleMarker, UserMarker},
            Id,
        },
        user::User,
    };
    use static_assertions::assert_impl_all;
    use std::fmt::Debug;

    assert_impl_all!(PermissionCalculator<'_>: Clone, Copy, Debug, Send, Sync);

    const GUILD_ID: Id<GuildMarker> = Id::new(1);
    const OWNER_ID: Id<UserMarker> = Id::new(2);
    const USER_ID: Id<UserMarker> = Id::new(3);
    const ROLE_ID: Id<RoleMarker> = Id::new(4);
    const ADMIN_ROLE_ID: Id<RoleMarker> = Id::new(5);

    fn role(id: Id<RoleMarker>, permissions: Permissions) -> Role {
        Role {
            permissions,
            ..Role::stub(id)
        }
    }

    fn guild(everyone: Permissions, member_role: Permissions) -> Guild {
        Guild {
            id: GUILD_ID,
            name: "test".to_owned(),
            owner_id: OWNER_ID,
            icon: None,
            roles: vec![
                role(GUILD_ID.cast(), everyone),
                role(ROLE_ID, member_role),
                role(ADMIN_ROLE_ID, Permissions::ADMINISTRATOR),
            ],
            channels: Vec::new(),
            threads: Vec::new(),
            members: Vec::new(),
            unavailable: false,
        }
    }

    fn channel(overwrites: Vec<PermissionOverwrite>) -> Channel {
        Channel {
            guild_id: Some(GUILD_ID),
            permission_overwrites: overwrites,
            ..Channel::stub(Id::new(10))
        }
    }

    #[test]
    fn owner_bypasses_everything() {
        let guild = guild(Permissions::empty(), Permissions::empty());
        let channel = channel(vec![
            PermissionOverwrite::role(GUILD_ID.cast(), Permissions::empty(), Permissions::all()),
            PermissionOverwrite::member(OWNER_ID, Permissions::empty(), Permissions::all()),
        ]);

        assert_eq!(
            member_permissions(&guild, &channel, OWNER_ID, &[]),
            Permissions::ALL
        );
        assert_eq!(
            PermissionCalculator::new(&guild, OWNER_ID, &[ROLE_ID]).root(),
            Permissions::ALL
        );
    }

    #[test]
    fn base_is_everyone_plus_roles() {
        let guild = guild(Permissions::VIEW_CHANNEL, Permissions::SEND_MESSAGES);
        let channel = channel(Vec::new());

        assert_eq!(
            member_permissions(&guild, &channel, USER_ID, &[ROLE_ID]),
            Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES
        );
        assert_eq!(
            member_permissions(&guild, &channel, USER_ID, &[]),
            Permissions::VIEW_CHANNEL
        );
    }

    #[test]
    fn missing_everyone_role_and_unknown_roles() {
        let mut guild = guild(Permissions::VIEW_CHANNEL, Permissions::SEND_MESSAGES);
        guild.roles.remove(0);
        let channel = channel(Vec::new());

        assert_eq!(
            member_permissions(&guild, &channel, USER_ID, &[Id::new(999)]),
            Permissions::empty()
        );
    }

    #[test]
    fn administrator_escalates_past_overwrites() {
        let guild = guild(Permissions::empty(), Permissions::empty());
        let channel = channel(vec![
            PermissionOverwrite::role(GUILD_ID.cast(), Permissions::empty(), Permissions::all()),
            PermissionOverwrite::role(ADMIN_ROLE_ID, Permissions::empty(), Permissions::all()),
            PermissionOverwrite::member(USER_ID, Permissions::empty(), Permissions::all()),
        ]);

        let calculator = PermissionCalculator::new(&guild, USER_ID, &[ADMIN_ROLE_ID]);
        assert_eq!(calculator.root(), Permissions::ALL);

        // Denying everything also clears ADMINISTRATOR, so the channel ceiling
        // isn't restored.
        assert_eq!(calculator.in_channel(&channel), Permissions::empty());

        let channel = self::channel(vec![PermissionOverwrite::role(
            GUILD_ID.cast(),
            Permissions::empty(),
            Permissions::ALL_CHANNEL,
        )]);
        let permissions = calculator.in_channel(&channel);
        assert!(permissions.contains(Permissions::ALL_CHANNEL));
        assert!(permissions.contains(Permissions::ADMINISTRATOR));
    }

    #[test]
    fn administrator_regains_channel_permissions_after_denies() {
        let guild = guild(Permissions::VIEW_CHANNEL, Permissions::empty());
        let channel = channel(vec![
            PermissionOverwrite::role(GUILD_ID.cast(), Permissions::empty(), Permissions::ALL_CHANNEL),
            PermissionOverwrite::role(ADMIN_ROLE_ID, Permissions::empty(), Permissions::ALL_CHANNEL),
            PermissionOverwrite::member(USER_ID, Permissions::empty(), Permissions::ALL_CHANNEL),
        ]);

        let admin = member_permissions(&guild, &channel, USER_ID, &[ADMIN_ROLE_ID]);
        assert!(admin.contains(Permissions::ALL_CHANNEL));
        assert!(admin.contains(Permissions::ADMINISTRATOR));

        // The same overwrites leave a regular member with nothing.
        let regular = member_permissions(&guild, &channel, USER_ID, &[ROLE_ID]);
        assert!(regular.intersection(Permissions::ALL_CHANNEL).is_empty());
    }

    #[test]
    fn member_overwrite_wins() {
        let x = Permissions::SEND_MESSAGES;
        let guild = guild(x, Permissions::empty());
        let channel = channel(vec![
            PermissionOverwrite::member(USER_ID, Permissions::empty(), x),
            PermissionOverwrite::role(ROLE_ID, x, Permissions::empty()),
            PermissionOverwrite::role(GUILD_ID.cast(), Permissions::empty(), x),
        ]);

        assert!(!member_permissions(&guild, &channel, USER_ID, &[ROLE_ID]).contains(x));
        // Another user only gets the role overwrite.
        assert!(member_permissions(&guild, &channel, Id::new(77), &[ROLE_ID]).contains(x));
    }

    #[test]
    fn everyone_deny_clears_role_grant() {
        let guild = guild(Permissions::empty(), Permissions::SEND_MESSAGES);
        let channel = channel(vec![PermissionOverwrite::role(
            GUILD_ID.cast(),
            Permissions::empty(),
            Permissions::SEND_MESSAGES,
        )]);

        assert!(!member_permissions(&guild, &channel, USER_ID, &[ROLE_ID])
            .contains(Permissions::SEND_MESSAGES));
    }

    #[test]
    fn role_overwrites_are_combined() {
        let other_role = Id::new(6);
        let mut guild = guild(Permissions::VIEW_CHANNEL, Permissions::empty());
        guild.roles.push(role(other_role, Permissions::empty()));
        let channel = channel(vec![
            PermissionOverwrite::role(ROLE_ID, Permissions::empty(), Permissions::ATTACH_FILES),
            PermissionOverwrite::role(other_role, Permissions::ATTACH_FILES, Permissions::empty()),
        ]);

        // All denies are cleared before any allow is set.
        assert!(member_permissions(&guild, &channel, USER_ID, &[ROLE_ID, other_role])
            .contains(Permissions::ATTACH_FILES));
        assert!(!member_permissions(&guild, &channel, USER_ID, &[ROLE_ID])
            .contains(Permissions::ATTACH_FILES));
    }

    #[test]
    fn only_first_member_overwrite_applies() {
        let guild = guild(Permissions::empty(), Permissions::empty());
        let channel = channel(vec![
            PermissionOverwrite::member(USER_ID, Permissions::EMBED_LINKS, Permissions::empty()),
            PermissionOverwrite::member(USER_ID, Permissions::ATTACH_FILES, Permissions::empty()),
        ]);

        assert_eq!(
            member_permissions(&guild, &channel, USER_ID, &[]),
            Permissions::EMBED_LINKS
        );
    }

    #[test]
    fn unknown_bits_are_preserved() {
        let unknown = Permissions::from_bits_retain(1 << 62);
        let guild = guild(unknown, Permissions::empty());

        assert!(member_permissions(&guild, &channel(Vec::new()), USER_ID, &[]).contains(unknown));
    }

    #[test]
    fn member_without_user_uses_roles_only() {
        let guild = guild(Permissions::VIEW_CHANNEL, Permissions::SEND_MESSAGES);
        let channel = channel(vec![PermissionOverwrite::member(
            USER_ID,
            Permissions::empty(),
            Permissions::VIEW_CHANNEL,
        )]);
        let mut member = Member {
            user: None,
            nick: None,
            roles: vec![ROLE_ID],
            joined_at: None,
            deaf: false,
            mute: false,
            pending: false,
            permissions: None,
        };

        assert_eq!(
            channel_permissions(&guild, &channel, &member),
            Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES
        );

        member.user = Some(User::stub(USER_ID));
        assert_eq!(
            channel_permissions(&guild, &channel, &member),
            Permissions::SEND_MESSAGES
        );
    }
}
