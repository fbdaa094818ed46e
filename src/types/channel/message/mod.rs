//! Messages and the components attached to them.

pub mod component;

use self::component::Component;
use crate::types::{
    id::{
        marker::{ChannelMarker, GuildMarker, MessageMarker},
        Id,
    },
    user::User,
};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags on a message or an interaction response.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        const CROSSPOSTED = 1;
        const IS_CROSSPOST = 1 << 1;
        const SUPPRESS_EMBEDS = 1 << 2;
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        const URGENT = 1 << 4;
        const HAS_THREAD = 1 << 5;
        /// Only visible to the user who invoked the interaction.
        const EPHEMERAL = 1 << 6;
        const LOADING = 1 << 7;
        const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD = 1 << 8;
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
        const IS_VOICE_MESSAGE = 1 << 13;
        /// Layout comes from components only; `content` and embeds are
        /// not allowed.
        const IS_COMPONENTS_V2 = 1 << 15;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}

/// Message a component interaction was triggered from.
///
/// Only what component handling needs is modelled.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    pub author: User,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

#[cfg(test)]
mod tests {
    use super::{Message, MessageFlags};
    use serde_json::json;

    #[test]
    fn decodes_components() {
        let message: Message = serde_json::from_value(json!({
            "id": "1",
            "channel_id": "2",
            "author": { "id": "3", "username": "bot", "bot": true },
            "content": "",
            "flags": 32768,
            "components": [
                { "type": 17, "components": [{ "type": 10, "content": "hi" }] },
            ],
        }))
        .unwrap();

        assert_eq!(message.components.len(), 1);
        assert_eq!(message.flags, Some(MessageFlags::IS_COMPONENTS_V2));
    }

    #[test]
    fn unknown_component_fails_the_message() {
        let result = serde_json::from_value::<Message>(json!({
            "id": "1",
            "channel_id": "2",
            "author": { "id": "3", "username": "bot" },
            "components": [{ "type": 250 }],
        }));

        assert!(result.is_err());
    }
}
