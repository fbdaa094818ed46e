//! Command metadata referenced by interaction payloads.

use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Kind of application command.
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum CommandType {
    /// Slash command.
    #[default]
    ChatInput = 1,
    /// Context-menu command on a user.
    User = 2,
    /// Context-menu command on a message.
    Message = 3,
    /// Activity launch entry point.
    PrimaryEntryPoint = 4,
}

/// Declared type of a command option.
#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum CommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    /// Any integer between -2^53 and 2^53.
    Integer = 4,
    Boolean = 5,
    User = 6,
    /// Includes all channel types and categories.
    Channel = 7,
    Role = 8,
    /// Users and roles.
    Mentionable = 9,
    /// Any double between -2^53 and 2^53.
    Number = 10,
    Attachment = 11,
}

impl CommandOptionType {
    /// Name as used in Discord's documentation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SubCommand => "SubCommand",
            Self::SubCommandGroup => "SubCommandGroup",
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::User => "User",
            Self::Channel => "Channel",
            Self::Role => "Role",
            Self::Mentionable => "Mentionable",
            Self::Number => "Number",
            Self::Attachment => "Attachment",
        }
    }
}

impl Display for CommandOptionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandOptionType, CommandType};
    use serde_test::Token;

    #[test]
    fn variants() {
        serde_test::assert_tokens(&CommandOptionType::Number, &[Token::U8(10)]);
        serde_test::assert_tokens(&CommandType::Message, &[Token::U8(3)]);
        assert_eq!(CommandOptionType::Integer.to_string(), "Integer");
    }
}
