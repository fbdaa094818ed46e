//! Data of a command or autocomplete interaction.

use super::InteractionDataResolved;
use crate::{
    resolve::Resolver,
    types::{
        application::command::{CommandOptionType, CommandType},
        channel::Channel,
        guild::Role,
        id::{
            marker::{CommandMarker, GenericMarker, GuildMarker},
            Id,
        },
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invoked command, its options and the entities they reference.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CommandData {
    pub id: Id<CommandMarker>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: CommandType,
    /// Guild the command is registered in, for guild commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandDataOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<InteractionDataResolved>,
    /// User or message targeted by a context-menu command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Id<GenericMarker>>,
}

impl CommandData {
    /// Top-level option with the given name.
    pub fn option(&self, name: &str) -> Option<&CommandDataOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Option the user is typing into, for autocomplete.
    ///
    /// Searches through subcommands and subcommand groups.
    pub fn focused_option(&self) -> Option<&CommandDataOption> {
        find_focused(&self.options)
    }
}

fn find_focused(options: &[CommandDataOption]) -> Option<&CommandDataOption> {
    options.iter().find_map(|option| {
        if option.focused {
            Some(option)
        } else {
            find_focused(&option.options)
        }
    })
}

/// Value submitted for one command option.
///
/// The value is kept as raw JSON; the typed accessors read it according to
/// [`kind`](Self::kind). Calling an accessor that doesn't match the kind is a
/// programming error and panics.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CommandDataOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    /// Absent for subcommands and subcommand groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Options of a subcommand or subcommand group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandDataOption>,
    /// Whether the user is currently typing into this option.
    #[serde(default, skip_serializing_if = "crate::types::util::is_false")]
    pub focused: bool,
}

impl CommandDataOption {
    #[track_caller]
    fn expect_kind(&self, expected: CommandOptionType, accessor: &str) {
        assert!(
            self.kind == expected,
            "{accessor} called on option `{}` of type {}",
            self.name,
            self.kind,
        );
    }

    /// Nested option with the given name.
    pub fn option(&self, name: &str) -> Option<&CommandDataOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Value of an integer option.
    ///
    /// Discord sends integers as JSON numbers, sometimes in float form, and
    /// as a string while the option is being typed during autocomplete. All
    /// three are accepted. Returns `0` if the value is missing or unparsable.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::Integer`].
    #[track_caller]
    pub fn int_value(&self) -> i64 {
        self.expect_kind(CommandOptionType::Integer, "int_value");

        match &self.value {
            Some(Value::Number(number)) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float as i64))
                .unwrap_or_default(),
            Some(Value::String(partial)) => {
                let partial = partial.trim();
                partial
                    .parse::<i64>()
                    .ok()
                    .or_else(|| partial.parse::<f64>().ok().map(|float| float as i64))
                    .unwrap_or_default()
            }
            _ => 0,
        }
    }

    /// Value of a number option. Returns `0.0` if missing or unparsable.
    ///
    /// Like [`int_value`](Self::int_value), the string form sent during
    /// autocomplete is accepted.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::Number`].
    #[track_caller]
    pub fn float_value(&self) -> f64 {
        self.expect_kind(CommandOptionType::Number, "float_value");

        match &self.value {
            Some(Value::Number(number)) => number.as_f64().unwrap_or_default(),
            Some(Value::String(partial)) => partial.trim().parse().unwrap_or_default(),
            _ => 0.0,
        }
    }

    /// Value of a boolean option. Returns `false` if missing.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::Boolean`].
    #[track_caller]
    pub fn bool_value(&self) -> bool {
        self.expect_kind(CommandOptionType::Boolean, "bool_value");

        self.value
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }

    /// Value of a string option. Returns `""` if missing.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::String`].
    #[track_caller]
    pub fn string_value(&self) -> &str {
        self.expect_kind(CommandOptionType::String, "string_value");

        self.value
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Raw snowflake carried by an entity option.
    fn snowflake<T>(&self) -> Option<Id<T>> {
        match self.value.as_ref()? {
            Value::String(raw) => raw.parse().ok(),
            Value::Number(number) => number.as_u64().and_then(Id::new_checked),
            _ => None,
        }
    }

    /// Channel selected in a channel option.
    ///
    /// The channel is taken from local state, then fetched remotely, and
    /// finally stubbed with only its ID. Returns `None` only when the option
    /// doesn't carry a valid ID.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::Channel`].
    pub async fn channel_value(&self, resolver: &Resolver<'_>) -> Option<Channel> {
        self.expect_kind(CommandOptionType::Channel, "channel_value");

        Some(resolver.channel(self.snowflake()?).await)
    }

    /// Role selected in a role option, resolved within `guild_id`.
    ///
    /// Falls back to a stub role as [`channel_value`](Self::channel_value)
    /// does.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::Role`].
    pub async fn role_value(
        &self,
        resolver: &Resolver<'_>,
        guild_id: Option<Id<GuildMarker>>,
    ) -> Option<Role> {
        self.expect_kind(CommandOptionType::Role, "role_value");

        Some(resolver.role(guild_id, self.snowflake()?).await)
    }

    /// User selected in a user option.
    ///
    /// Falls back to a stub user as [`channel_value`](Self::channel_value)
    /// does.
    ///
    /// # Panics
    ///
    /// Panics if the option isn't of type [`CommandOptionType::User`].
    pub async fn user_value(&self, resolver: &Resolver<'_>) -> Option<User> {
        self.expect_kind(CommandOptionType::User, "user_value");

        Some(resolver.user(self.snowflake()?).await)
    }
}
