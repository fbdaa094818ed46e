use bitflags::bitflags;
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use std::fmt::{Formatter, Result as FmtResult};

bitflags! {
    /// Set of permissions a role, member or overwrite grants or denies.
    ///
    /// Discord sends permissions as a decimal string so that the full 64-bit
    /// range survives JSON number parsing. Bits this crate does not know about
    /// are retained rather than truncated.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        /// Bypasses every channel overwrite.
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VAD = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        const USE_APPLICATION_COMMANDS = 1 << 31;
        const REQUEST_TO_SPEAK = 1 << 32;
        const MANAGE_EVENTS = 1 << 33;
        const MANAGE_THREADS = 1 << 34;
        const CREATE_PUBLIC_THREADS = 1 << 35;
        const CREATE_PRIVATE_THREADS = 1 << 36;
        const USE_EXTERNAL_STICKERS = 1 << 37;
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
        const USE_EMBEDDED_ACTIVITIES = 1 << 39;
        const MODERATE_MEMBERS = 1 << 40;
        const VIEW_CREATOR_MONETIZATION_ANALYTICS = 1 << 41;
        const USE_SOUNDBOARD = 1 << 42;
        const CREATE_GUILD_EXPRESSIONS = 1 << 43;
        const CREATE_EVENTS = 1 << 44;
        const USE_EXTERNAL_SOUNDS = 1 << 45;
        const SEND_VOICE_MESSAGES = 1 << 46;
        const SEND_POLLS = 1 << 49;
        const USE_EXTERNAL_APPS = 1 << 50;
        const PIN_MESSAGES = 1 << 51;
    }
}

impl Permissions {
    /// Every permission relevant to text channels.
    pub const ALL_TEXT: Self = Self::from_bits_retain(
        Self::VIEW_CHANNEL.bits()
            | Self::SEND_MESSAGES.bits()
            | Self::SEND_TTS_MESSAGES.bits()
            | Self::MANAGE_MESSAGES.bits()
            | Self::EMBED_LINKS.bits()
            | Self::ATTACH_FILES.bits()
            | Self::READ_MESSAGE_HISTORY.bits()
            | Self::MENTION_EVERYONE.bits(),
    );

    /// Every permission relevant to voice channels.
    pub const ALL_VOICE: Self = Self::from_bits_retain(
        Self::VIEW_CHANNEL.bits()
            | Self::CONNECT.bits()
            | Self::SPEAK.bits()
            | Self::MUTE_MEMBERS.bits()
            | Self::DEAFEN_MEMBERS.bits()
            | Self::MOVE_MEMBERS.bits()
            | Self::USE_VAD.bits()
            | Self::PRIORITY_SPEAKER.bits(),
    );

    /// Ceiling of what can be granted within a single channel.
    pub const ALL_CHANNEL: Self = Self::from_bits_retain(
        Self::ALL_TEXT.bits()
            | Self::ALL_VOICE.bits()
            | Self::CREATE_INSTANT_INVITE.bits()
            | Self::MANAGE_ROLES.bits()
            | Self::MANAGE_CHANNELS.bits()
            | Self::ADD_REACTIONS.bits()
            | Self::VIEW_AUDIT_LOG.bits(),
    );

    /// Guild-wide "all permissions" mask granted to owners and administrators.
    pub const ALL: Self = Self::from_bits_retain(
        Self::ALL_CHANNEL.bits()
            | Self::KICK_MEMBERS.bits()
            | Self::BAN_MEMBERS.bits()
            | Self::MANAGE_GUILD.bits()
            | Self::ADMINISTRATOR.bits()
            | Self::MANAGE_WEBHOOKS.bits()
            | Self::MANAGE_GUILD_EXPRESSIONS.bits(),
    );
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}

struct PermissionsVisitor;

impl Visitor<'_> for PermissionsVisitor {
    type Value = Permissions;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a permission integer, optionally quoted")
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Permissions::from_bits_retain(v))
    }

    fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        // Signed input is reinterpreted bit-for-bit.
        Ok(Permissions::from_bits_retain(v as u64))
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        let num = v
            .parse::<u64>()
            .or_else(|_| v.parse::<i64>().map(|signed| signed as u64))
            .map_err(|_| E::custom(format!("invalid permission integer: {v:?}")))?;

        Ok(Permissions::from_bits_retain(num))
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::Permissions;
    use serde_test::Token;

    #[test]
    fn serializes_as_quoted_integer() {
        serde_test::assert_tokens(
            &(Permissions::SEND_MESSAGES | Permissions::VIEW_CHANNEL),
            &[Token::Str("3072")],
        );
    }

    #[test]
    fn accepts_unquoted_integer() {
        let perms: Permissions = serde_json::from_str("2048").unwrap();

        assert_eq!(perms, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn retains_unknown_bits() {
        let perms: Permissions = serde_json::from_str("\"9223372036854775808\"").unwrap();

        assert_eq!(perms.bits(), 1 << 63);
        assert_eq!(serde_json::to_string(&perms).unwrap(), "\"9223372036854775808\"");
    }

    #[test]
    fn channel_ceiling_is_subset_of_all() {
        assert!(Permissions::ALL.contains(Permissions::ALL_CHANNEL));
        assert!(Permissions::ALL.contains(Permissions::ADMINISTRATOR));
        assert!(!Permissions::ALL_CHANNEL.contains(Permissions::ADMINISTRATOR));
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Permissions>("\"not a number\"").is_err());
    }
}
