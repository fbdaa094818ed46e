//! Typed gateway events.
//!
//! Dispatch payloads are deserialised into [`GatewayEvent`] so the cache and
//! the interaction router can pattern-match on strongly-typed data instead of
//! raw `(op, t, serde_json::Value)` tuples.

use crate::types::{
    application::interaction::Interaction,
    channel::Channel,
    guild::{Guild, Member, Role, UnavailableGuild},
    id::{
        marker::{GuildMarker, RoleMarker},
        Id,
    },
    user::User,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Raw gateway payload envelope.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GatewayPayload {
    pub op: u8,
    pub d: Option<Value>,
    pub s: Option<u64>,
    pub t: Option<String>,
}

/// Opcode of dispatch payloads, the only ones carrying events.
pub const DISPATCH_OP: u8 = 0;

/// A fully-parsed event coming off the Discord gateway.
#[derive(Clone, Debug)]
pub enum GatewayEvent {
    GuildCreate(Box<Guild>),
    GuildUpdate(Box<Guild>),
    /// The guild became unavailable or the current user left it.
    GuildDelete(UnavailableGuild),
    ChannelCreate(Box<Channel>),
    ChannelUpdate(Box<Channel>),
    ChannelDelete(Box<Channel>),
    ThreadCreate(Box<Channel>),
    ThreadUpdate(Box<Channel>),
    /// Only `id`, `guild_id`, `parent_id` and `type` are sent.
    ThreadDelete(Box<Channel>),
    RoleCreate(RoleEvent),
    RoleUpdate(RoleEvent),
    RoleDelete(RoleDelete),
    MemberAdd(Box<MemberEvent>),
    MemberUpdate(Box<MemberEvent>),
    MemberRemove(MemberRemove),
    InteractionCreate(Box<Interaction>),
    /// An event without a typed variant, or one whose payload didn't parse.
    /// Carries the raw data so callers can still inspect it.
    Unknown {
        event_name: Option<String>,
        op: u8,
        data: Option<Value>,
    },
}

/// Payload of GUILD_ROLE_CREATE and GUILD_ROLE_UPDATE.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleEvent {
    pub guild_id: Id<GuildMarker>,
    pub role: Role,
}

/// Payload of GUILD_ROLE_DELETE.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleDelete {
    pub guild_id: Id<GuildMarker>,
    pub role_id: Id<RoleMarker>,
}

/// Payload of GUILD_MEMBER_ADD and GUILD_MEMBER_UPDATE.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberEvent {
    pub guild_id: Id<GuildMarker>,
    #[serde(flatten)]
    pub member: Member,
}

/// Payload of GUILD_MEMBER_REMOVE.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberRemove {
    pub guild_id: Id<GuildMarker>,
    pub user: User,
}

impl GatewayEvent {
    /// Convert a raw [`GatewayPayload`] into a typed event.
    ///
    /// This never fails: non-dispatch payloads, unlisted events and payloads
    /// that don't parse become [`GatewayEvent::Unknown`].
    pub fn from_payload(payload: GatewayPayload) -> Self {
        if payload.op != DISPATCH_OP {
            return Self::Unknown {
                event_name: payload.t,
                op: payload.op,
                data: payload.d,
            };
        }

        Self::parse_dispatch(payload.t, payload.d)
    }

    /// Name of the dispatch event this was parsed from.
    pub fn name(&self) -> Option<&str> {
        Some(match self {
            Self::GuildCreate(_) => "GUILD_CREATE",
            Self::GuildUpdate(_) => "GUILD_UPDATE",
            Self::GuildDelete(_) => "GUILD_DELETE",
            Self::ChannelCreate(_) => "CHANNEL_CREATE",
            Self::ChannelUpdate(_) => "CHANNEL_UPDATE",
            Self::ChannelDelete(_) => "CHANNEL_DELETE",
            Self::ThreadCreate(_) => "THREAD_CREATE",
            Self::ThreadUpdate(_) => "THREAD_UPDATE",
            Self::ThreadDelete(_) => "THREAD_DELETE",
            Self::RoleCreate(_) => "GUILD_ROLE_CREATE",
            Self::RoleUpdate(_) => "GUILD_ROLE_UPDATE",
            Self::RoleDelete(_) => "GUILD_ROLE_DELETE",
            Self::MemberAdd(_) => "GUILD_MEMBER_ADD",
            Self::MemberUpdate(_) => "GUILD_MEMBER_UPDATE",
            Self::MemberRemove(_) => "GUILD_MEMBER_REMOVE",
            Self::InteractionCreate(_) => "INTERACTION_CREATE",
            Self::Unknown { event_name, .. } => return event_name.as_deref(),
        })
    }

    /// If this is an `Unknown` event, try to deserialise its data.
    pub fn try_parse_data<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Unknown { data: Some(d), .. } => serde_json::from_value(d.clone()).ok(),
            _ => None,
        }
    }

    /// Parse a DISPATCH event by its `t` name.
    fn parse_dispatch(event_name: Option<String>, data: Option<Value>) -> Self {
        let (Some(name), Some(d)) = (event_name.as_deref(), data.as_ref()) else {
            return Self::Unknown {
                event_name,
                op: DISPATCH_OP,
                data,
            };
        };

        let parsed = match name {
            "GUILD_CREATE" => parse(name, d, |guild| Self::GuildCreate(Box::new(guild))),
            "GUILD_UPDATE" => parse(name, d, |guild| Self::GuildUpdate(Box::new(guild))),
            "GUILD_DELETE" => parse(name, d, Self::GuildDelete),
            "CHANNEL_CREATE" => parse(name, d, |channel| Self::ChannelCreate(Box::new(channel))),
            "CHANNEL_UPDATE" => parse(name, d, |channel| Self::ChannelUpdate(Box::new(channel))),
            "CHANNEL_DELETE" => parse(name, d, |channel| Self::ChannelDelete(Box::new(channel))),
            "THREAD_CREATE" => parse(name, d, |channel| Self::ThreadCreate(Box::new(channel))),
            "THREAD_UPDATE" => parse(name, d, |channel| Self::ThreadUpdate(Box::new(channel))),
            "THREAD_DELETE" => parse(name, d, |channel| Self::ThreadDelete(Box::new(channel))),
            "GUILD_ROLE_CREATE" => parse(name, d, Self::RoleCreate),
            "GUILD_ROLE_UPDATE" => parse(name, d, Self::RoleUpdate),
            "GUILD_ROLE_DELETE" => parse(name, d, Self::RoleDelete),
            "GUILD_MEMBER_ADD" => parse(name, d, |member| Self::MemberAdd(Box::new(member))),
            "GUILD_MEMBER_UPDATE" => parse(name, d, |member| Self::MemberUpdate(Box::new(member))),
            "GUILD_MEMBER_REMOVE" => parse(name, d, Self::MemberRemove),
            "INTERACTION_CREATE" => {
                parse(name, d, |interaction| Self::InteractionCreate(Box::new(interaction)))
            }
            _ => None,
        };

        parsed.unwrap_or(Self::Unknown {
            event_name,
            op: DISPATCH_OP,
            data,
        })
    }
}

fn parse<T: DeserializeOwned>(
    name: &str,
    data: &Value,
    wrap: impl FnOnce(T) -> GatewayEvent,
) -> Option<GatewayEvent> {
    match serde_json::from_value::<T>(data.clone()) {
        Ok(value) => Some(wrap(value)),
        Err(e) => {
            warn!(event = name, error = %e, "failed to parse dispatch payload");
            None
        }
    }
}
