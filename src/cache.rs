//! In-memory state built from gateway events.
//!
//! [`InMemoryCache`] is the local tier of the resolution chain: it implements
//! [`StateLookup`] and can answer permission queries without any request.
//! All maps are concurrent, so one cache can be shared between the task
//! feeding it events and the tasks handling interactions.

use crate::{
    events::{GatewayEvent, MemberEvent},
    permissions::PermissionCalculator,
    resolve::StateLookup,
    types::{
        channel::Channel,
        guild::{Guild, Member, Permissions, Role},
        id::{
            marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
            Id,
        },
        user::User,
    },
};
use dashmap::DashMap;
use std::collections::HashSet;
use tracing::trace;

/// Cache of guilds, channels, roles, members and users.
///
/// Guilds are stored without their channel, thread and member lists; those
/// live in their own maps and are kept current by the matching events.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    guilds: DashMap<Id<GuildMarker>, Guild>,
    channels: DashMap<Id<ChannelMarker>, Channel>,
    guild_channels: DashMap<Id<GuildMarker>, HashSet<Id<ChannelMarker>>>,
    members: DashMap<(Id<GuildMarker>, Id<UserMarker>), Member>,
    users: DashMap<Id<UserMarker>, User>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event to the cache. Events that don't affect cached state
    /// are ignored.
    pub fn update(&self, event: &GatewayEvent) {
        match event {
            GatewayEvent::GuildCreate(guild) | GatewayEvent::GuildUpdate(guild) => {
                self.cache_guild(guild);
            }
            GatewayEvent::GuildDelete(guild) => {
                if guild.unavailable {
                    if let Some(mut cached) = self.guilds.get_mut(&guild.id) {
                        cached.unavailable = true;
                    }
                } else {
                    self.remove_guild(guild.id);
                }
            }
            GatewayEvent::ChannelCreate(channel)
            | GatewayEvent::ChannelUpdate(channel)
            | GatewayEvent::ThreadCreate(channel)
            | GatewayEvent::ThreadUpdate(channel) => {
                if let Some(guild_id) = channel.guild_id {
                    self.cache_channel(guild_id, Channel::clone(channel));
                } else {
                    self.channels.insert(channel.id, Channel::clone(channel));
                }
            }
            GatewayEvent::ChannelDelete(channel) | GatewayEvent::ThreadDelete(channel) => {
                self.channels.remove(&channel.id);
                if let Some(guild_id) = channel.guild_id {
                    if let Some(mut ids) = self.guild_channels.get_mut(&guild_id) {
                        ids.remove(&channel.id);
                    }
                }
            }
            GatewayEvent::RoleCreate(event) | GatewayEvent::RoleUpdate(event) => {
                if let Some(mut guild) = self.guilds.get_mut(&event.guild_id) {
                    match guild.roles.iter().position(|role| role.id == event.role.id) {
                        Some(index) => guild.roles[index] = event.role.clone(),
                        None => guild.roles.push(event.role.clone()),
                    }
                }
            }
            GatewayEvent::RoleDelete(event) => {
                if let Some(mut guild) = self.guilds.get_mut(&event.guild_id) {
                    guild.roles.retain(|role| role.id != event.role_id);
                }
            }
            GatewayEvent::MemberAdd(event) | GatewayEvent::MemberUpdate(event) => {
                let MemberEvent { guild_id, member } = &**event;
                self.cache_member(*guild_id, member.clone());
            }
            GatewayEvent::MemberRemove(event) => {
                self.members.remove(&(event.guild_id, event.user.id));
            }
            GatewayEvent::InteractionCreate(interaction) => {
                if let (Some(guild_id), Some(member)) = (interaction.guild_id, &interaction.member)
                {
                    self.cache_member(guild_id, member.clone());
                } else if let Some(user) = &interaction.user {
                    self.users.insert(user.id, user.clone());
                }
            }
            GatewayEvent::Unknown { .. } => return,
        }

        trace!(event = event.name(), "cache updated");
    }

    fn cache_guild(&self, guild: &Guild) {
        let mut guild = guild.clone();

        let channels = std::mem::take(&mut guild.channels);
        let threads = std::mem::take(&mut guild.threads);
        for channel in channels.into_iter().chain(threads) {
            self.cache_channel(guild.id, channel);
        }

        for member in std::mem::take(&mut guild.members) {
            self.cache_member(guild.id, member);
        }

        self.guilds.insert(guild.id, guild);
    }

    /// Channels inside GUILD_CREATE come without `guild_id`; it is filled in.
    fn cache_channel(&self, guild_id: Id<GuildMarker>, mut channel: Channel) {
        channel.guild_id = Some(guild_id);
        self.guild_channels
            .entry(guild_id)
            .or_default()
            .insert(channel.id);
        self.channels.insert(channel.id, channel);
    }

    fn cache_member(&self, guild_id: Id<GuildMarker>, mut member: Member) {
        let Some(user) = member.user.take() else {
            return;
        };

        self.members.insert((guild_id, user.id), member);
        self.users.insert(user.id, user);
    }

    fn remove_guild(&self, guild_id: Id<GuildMarker>) {
        self.guilds.remove(&guild_id);

        if let Some((_, ids)) = self.guild_channels.remove(&guild_id) {
            for id in ids {
                self.channels.remove(&id);
            }
        }

        self.members.retain(|(member_guild, _), _| *member_guild != guild_id);
    }

    /// Cached guild. Its channel, thread and member lists are empty.
    pub fn guild(&self, guild_id: Id<GuildMarker>) -> Option<Guild> {
        self.guilds.get(&guild_id).map(|guild| guild.value().clone())
    }

    /// Cached member. Its `user` is `None`; see [`StateLookup::user`].
    pub fn member(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>) -> Option<Member> {
        self.members
            .get(&(guild_id, user_id))
            .map(|member| member.value().clone())
    }

    /// IDs of the cached channels and threads of a guild.
    pub fn guild_channel_ids(&self, guild_id: Id<GuildMarker>) -> Vec<Id<ChannelMarker>> {
        self.guild_channels
            .get(&guild_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Permissions of a cached member in a cached channel.
    ///
    /// Threads are resolved against their parent channel. Returns `None` if
    /// the channel, its guild or the member isn't cached.
    pub fn user_channel_permissions(
        &self,
        user_id: Id<UserMarker>,
        channel_id: Id<ChannelMarker>,
    ) -> Option<Permissions> {
        let mut channel = self.channels.get(&channel_id)?.value().clone();
        if channel.is_thread() {
            channel = self.channels.get(&channel.parent_id?)?.value().clone();
        }

        let guild_id = channel.guild_id?;
        let guild = self.guilds.get(&guild_id)?;

        let roles = if user_id == guild.owner_id {
            Vec::new()
        } else {
            self.members.get(&(guild_id, user_id))?.roles.clone()
        };

        Some(PermissionCalculator::new(&guild, user_id, &roles).in_channel(&channel))
    }

    /// Guild-level permissions of a cached member.
    pub fn user_guild_permissions(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Option<Permissions> {
        let guild = self.guilds.get(&guild_id)?;
        let roles = if user_id == guild.owner_id {
            Vec::new()
        } else {
            self.members.get(&(guild_id, user_id))?.roles.clone()
        };

        Some(PermissionCalculator::new(&guild, user_id, &roles).root())
    }
}

impl StateLookup for InMemoryCache {
    fn channel(&self, id: Id<ChannelMarker>) -> Option<Channel> {
        self.channels.get(&id).map(|channel| channel.value().clone())
    }

    fn role(&self, guild_id: Id<GuildMarker>, role_id: Id<RoleMarker>) -> Option<Role> {
        self.guilds.get(&guild_id)?.role(role_id).cloned()
    }

    fn user(&self, id: Id<UserMarker>) -> Option<User> {
        self.users.get(&id).map(|user| user.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryCache;
    use crate::{
        events::{GatewayEvent, GatewayPayload},
        resolve::{Resolver, StateLookup},
        types::{guild::Permissions, id::Id},
    };
    use futures_lite::future::block_on;
    use serde_json::{json, Value};
    use static_assertions::assert_impl_all;

    assert_impl_all!(InMemoryCache: Send, Sync);

    const SEND: u64 = 1 << 11;
    const VIEW: u64 = 1 << 10;

    fn event(name: &str, d: Value) -> GatewayEvent {
        GatewayEvent::from_payload(GatewayPayload {
            op: 0,
            d: Some(d),
            s: None,
            t: Some(name.to_owned()),
        })
    }

    fn cache() -> InMemoryCache {
        let cache = InMemoryCache::new();
        cache.update(&event(
            "GUILD_CREATE",
            json!({
                "id": "1",
                "name": "guild",
                "owner_id": "2",
                "roles": [
                    { "id": "1", "name": "@everyone", "position": 0, "permissions": VIEW.to_string() },
                    { "id": "10", "name": "talker", "position": 1, "permissions": SEND.to_string() },
                ],
                "channels": [{
                    "id": "20",
                    "type": 0,
                    "name": "general",
                    "permission_overwrites": [
                        { "id": "1", "type": 0, "allow": "0", "deny": SEND.to_string() },
                    ],
                }],
                "threads": [{ "id": "21", "type": 11, "parent_id": "20", "name": "chat" }],
                "members": [
                    { "user": { "id": "3", "username": "erin" }, "roles": ["10"] },
                ],
            }),
        ));

        cache
    }

    #[test]
    fn guild_create_populates_maps() {
        let cache = cache();

        let channel = cache.channel(Id::new(20)).unwrap();
        assert_eq!(channel.guild_id, Some(Id::new(1)));
        assert_eq!(cache.guild_channel_ids(Id::new(1)).len(), 2);
        assert_eq!(cache.user(Id::new(3)).unwrap().name, "erin");
        assert_eq!(cache.role(Id::new(1), Id::new(10)).unwrap().name, "talker");
        assert!(cache.guild(Id::new(1)).unwrap().channels.is_empty());
        assert!(cache.member(Id::new(1), Id::new(3)).unwrap().user.is_none());
    }

    #[test]
    fn thread_uses_parent_overwrites() {
        let cache = cache();
        let expected = Permissions::VIEW_CHANNEL;

        assert_eq!(cache.user_channel_permissions(Id::new(3), Id::new(20)), Some(expected));
        assert_eq!(cache.user_channel_permissions(Id::new(3), Id::new(21)), Some(expected));
        assert_eq!(
            cache.user_guild_permissions(Id::new(1), Id::new(3)),
            Some(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES)
        );
        assert_eq!(
            cache.user_channel_permissions(Id::new(2), Id::new(21)),
            Some(Permissions::ALL)
        );
        assert_eq!(cache.user_channel_permissions(Id::new(99), Id::new(20)), None);
    }

    #[test]
    fn role_and_member_events() {
        let cache = cache();

        cache.update(&event(
            "GUILD_ROLE_UPDATE",
            json!({
                "guild_id": "1",
                "role": { "id": "10", "name": "talker", "position": 1, "permissions": "0" },
            }),
        ));
        assert_eq!(
            cache.user_guild_permissions(Id::new(1), Id::new(3)),
            Some(Permissions::VIEW_CHANNEL)
        );

        cache.update(&event(
            "GUILD_ROLE_CREATE",
            json!({
                "guild_id": "1",
                "role": { "id": "11", "name": "admin", "position": 2, "permissions": "8" },
            }),
        ));
        cache.update(&event(
            "GUILD_MEMBER_UPDATE",
            json!({ "guild_id": "1", "roles": ["11"], "user": { "id": "3", "username": "erin" } }),
        ));
        assert_eq!(
            cache.user_guild_permissions(Id::new(1), Id::new(3)),
            Some(Permissions::ALL)
        );

        cache.update(&event("GUILD_ROLE_DELETE", json!({ "guild_id": "1", "role_id": "11" })));
        assert!(cache.role(Id::new(1), Id::new(11)).is_none());

        cache.update(&event(
            "GUILD_MEMBER_REMOVE",
            json!({ "guild_id": "1", "user": { "id": "3", "username": "erin" } }),
        ));
        assert!(cache.member(Id::new(1), Id::new(3)).is_none());
    }

    #[test]
    fn channel_and_guild_delete() {
        let cache = cache();

        cache.update(&event("THREAD_DELETE", json!({ "id": "21", "guild_id": "1", "type": 11 })));
        assert!(cache.channel(Id::new(21)).is_none());
        assert_eq!(cache.guild_channel_ids(Id::new(1)), [Id::new(20)]);

        cache.update(&event("GUILD_DELETE", json!({ "id": "1", "unavailable": true })));
        assert!(cache.guild(Id::new(1)).unwrap().unavailable);

        cache.update(&event("GUILD_DELETE", json!({ "id": "1" })));
        assert!(cache.guild(Id::new(1)).is_none());
        assert!(cache.channel(Id::new(20)).is_none());
        assert!(cache.member(Id::new(1), Id::new(3)).is_none());
    }

    #[test]
    fn resolver_prefers_cache() {
        let cache = cache();
        let resolver = Resolver::new().with_state(&cache);

        assert_eq!(block_on(resolver.channel(Id::new(20))).name.as_deref(), Some("general"));
        assert_eq!(block_on(resolver.role(Some(Id::new(1)), Id::new(10))).name, "talker");
    }
}
