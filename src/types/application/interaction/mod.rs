//! Inbound interactions and their per-kind payloads.

pub mod application_command;
pub mod message_component;
pub mod modal;
pub mod response;

pub use self::{
    application_command::{CommandData, CommandDataOption},
    message_component::MessageComponentInteractionData,
    modal::ModalInteractionData,
    response::{
        CommandOptionChoice, InteractionCallbackData, InteractionCallbackType,
        InteractionResponse, InteractionResponseData,
    },
};

use crate::{
    error::DecodeError,
    types::{
        channel::{message::Message, Channel},
        guild::{Member, Permissions, Role},
        id::{
            marker::{
                ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, RoleMarker,
                UserMarker,
            },
            Id,
        },
        user::User,
        util::ValueExt,
    },
};
use chrono::{DateTime, Duration, Utc};
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Time Discord waits for the initial response before failing the
/// interaction, in seconds.
pub const INITIAL_RESPONSE_DEADLINE_SECS: i64 = 3;

/// Lifetime of an interaction token for follow-ups, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 15 * 60;

/// Time Discord waits for the initial response.
pub const INITIAL_RESPONSE_DEADLINE: std::time::Duration =
    std::time::Duration::from_secs(INITIAL_RESPONSE_DEADLINE_SECS as u64);

/// How long the interaction token stays valid.
pub const TOKEN_LIFETIME: std::time::Duration =
    std::time::Duration::from_secs(TOKEN_LIFETIME_SECS as u64);

/// Payload received when a user invokes a command, presses a component or
/// submits a modal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interaction {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// `None` for pings and unrecognised interaction types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    /// Invoking member, present in guilds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Invoking user, present in DMs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub token: String,
    pub version: u8,
    /// Message the component was attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_permissions: Option<Permissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
}

impl Interaction {
    /// User who triggered the interaction, in a guild or in a DM.
    pub fn author(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    /// ID of the user who triggered the interaction.
    pub fn author_id(&self) -> Option<Id<UserMarker>> {
        self.author().map(|user| user.id)
    }

    /// Whether the interaction was invoked inside a guild.
    pub const fn is_guild(&self) -> bool {
        self.guild_id.is_some()
    }

    /// Creation time, taken from the interaction's ID.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.id.timestamp_ms())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Latest moment an initial response is accepted.
    pub fn response_deadline(&self) -> Option<DateTime<Utc>> {
        self.created_at()
            .map(|at| at + Duration::seconds(INITIAL_RESPONSE_DEADLINE_SECS))
    }

    /// Moment the token stops working for follow-ups.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.created_at()
            .map(|at| at + Duration::seconds(TOKEN_LIFETIME_SECS))
    }

    /// Command payload, for commands and autocomplete.
    pub fn command_data(&self) -> Option<&CommandData> {
        match &self.data {
            Some(InteractionData::ApplicationCommand(data)) => Some(data),
            _ => None,
        }
    }

    /// Component payload, for button presses and select menus.
    pub fn component_data(&self) -> Option<&MessageComponentInteractionData> {
        match &self.data {
            Some(InteractionData::MessageComponent(data)) => Some(data),
            _ => None,
        }
    }

    /// Modal submit payload.
    pub fn modal_data(&self) -> Option<&ModalInteractionData> {
        match &self.data {
            Some(InteractionData::ModalSubmit(data)) => Some(data),
            _ => None,
        }
    }
}

/// Fields common to every interaction; `data` is kept raw until the kind
/// is known.
#[derive(Deserialize)]
struct InteractionEnvelope {
    id: Id<InteractionMarker>,
    application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    kind: InteractionType,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    guild_id: Option<Id<GuildMarker>>,
    #[serde(default)]
    channel_id: Option<Id<ChannelMarker>>,
    #[serde(default)]
    channel: Option<Channel>,
    #[serde(default)]
    member: Option<Member>,
    #[serde(default)]
    user: Option<User>,
    token: String,
    #[serde(default = "default_version")]
    version: u8,
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    app_permissions: Option<Permissions>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    guild_locale: Option<String>,
}

const fn default_version() -> u8 {
    1
}

/// Decode an interaction, selecting the shape of `data` from its `type`.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the common fields are malformed, or if the
/// interaction is of a known kind and its `data` doesn't match that kind.
pub fn decode_interaction(value: Value) -> Result<Interaction, DecodeError> {
    let envelope = value.deserialize_into::<InteractionEnvelope>()?;

    let data = match envelope.data {
        Some(data) => decode_interaction_data(envelope.kind, data)?,
        None => None,
    };

    Ok(Interaction {
        id: envelope.id,
        application_id: envelope.application_id,
        kind: envelope.kind,
        data,
        guild_id: envelope.guild_id,
        channel_id: envelope.channel_id,
        channel: envelope.channel,
        member: envelope.member,
        user: envelope.user,
        token: envelope.token,
        version: envelope.version,
        message: envelope.message,
        app_permissions: envelope.app_permissions,
        locale: envelope.locale,
        guild_locale: envelope.guild_locale,
    })
}

/// Decode the `data` object of an interaction of the given kind.
///
/// Kinds without typed data (pings and unrecognised kinds) yield `None`.
///
/// # Errors
///
/// Returns a [`DecodeError`] if `data` doesn't match the shape for `kind`.
pub fn decode_interaction_data(
    kind: InteractionType,
    data: Value,
) -> Result<Option<InteractionData>, DecodeError> {
    let data = match kind {
        InteractionType::ApplicationCommand | InteractionType::ApplicationCommandAutocomplete => {
            InteractionData::ApplicationCommand(Box::new(data.deserialize_into()?))
        }
        InteractionType::MessageComponent => {
            InteractionData::MessageComponent(Box::new(data.deserialize_into()?))
        }
        InteractionType::ModalSubmit => {
            InteractionData::ModalSubmit(Box::new(data.deserialize_into()?))
        }
        InteractionType::Ping | InteractionType::Unknown(_) => {
            debug!(?kind, "interaction kind carries no typed data");

            return Ok(None);
        }
    };

    Ok(Some(data))
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        decode_interaction(value).map_err(DeError::custom)
    }
}

/// Kind of [`Interaction`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutocomplete,
    ModalSubmit,
    Unknown(u16),
}

impl InteractionType {
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Ping => "Ping",
            Self::ApplicationCommand => "ApplicationCommand",
            Self::MessageComponent => "MessageComponent",
            Self::ApplicationCommandAutocomplete => "ApplicationCommandAutocomplete",
            Self::ModalSubmit => "ModalSubmit",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<u16> for InteractionType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<InteractionType> for u16 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(unknown) => unknown,
        }
    }
}

/// Typed `data` of an [`Interaction`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InteractionData {
    /// Slash, user and message commands, and autocomplete.
    ApplicationCommand(Box<CommandData>),
    MessageComponent(Box<MessageComponentInteractionData>),
    ModalSubmit(Box<ModalInteractionData>),
}

/// Entities referenced by IDs in an interaction's options or values.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InteractionDataResolved {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub users: HashMap<Id<UserMarker>, User>,
    /// Partial members; `user` is only found in `users`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub members: HashMap<Id<UserMarker>, Member>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub roles: HashMap<Id<RoleMarker>, Role>,
    /// Partial channels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channels: HashMap<Id<ChannelMarker>, Channel>,
}

impl InteractionDataResolved {
    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.members.is_empty()
            && self.roles.is_empty()
            && self.channels.is_empty()
    }
}
