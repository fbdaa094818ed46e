//! Channels, messages and components.

pub mod message;
pub mod permission_overwrite;

pub use self::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};

use crate::types::id::{
    marker::{ChannelMarker, GuildMarker, UserMarker},
    Id,
};
use serde::{Deserialize, Serialize};

/// A guild channel, thread or private channel.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Channel {
    pub id: Id<ChannelMarker>,
    #[serde(rename = "type", default)]
    pub kind: ChannelType,
    /// `None` for DMs, and for channels received inside a GUILD_CREATE
    /// payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Category for guild channels; parent channel for threads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id<ChannelMarker>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_overwrites: Vec<PermissionOverwrite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub nsfw: bool,
    /// Creator of a thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Id<UserMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_metadata: Option<ThreadMetadata>,
}

impl Channel {
    /// Placeholder carrying only the channel's ID.
    pub fn stub(id: Id<ChannelMarker>) -> Self {
        Self {
            id,
            kind: ChannelType::default(),
            guild_id: None,
            name: None,
            position: None,
            parent_id: None,
            permission_overwrites: Vec::new(),
            topic: None,
            nsfw: false,
            owner_id: None,
            member_count: None,
            message_count: None,
            thread_metadata: None,
        }
    }

    /// Whether the channel is a thread.
    pub const fn is_thread(&self) -> bool {
        self.kind.is_thread()
    }

    /// Mention string, e.g. `<#123>`.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// Thread-only state.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ThreadMetadata {
    pub archived: bool,
    /// Minutes of inactivity before the thread is archived.
    pub auto_archive_duration: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_timestamp: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitable: Option<bool>,
}

/// Type discriminant of a [`Channel`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum ChannelType {
    #[default]
    GuildText,
    Private,
    GuildVoice,
    Group,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    GuildMedia,
    Unknown(u16),
}

impl ChannelType {
    /// Whether this is one of the three thread kinds.
    pub const fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }

    /// Whether the channel belongs to a guild.
    pub const fn is_guild(self) -> bool {
        !matches!(self, Self::Private | Self::Group | Self::Unknown(_))
    }
}

impl From<u16> for ChannelType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Private,
            2 => Self::GuildVoice,
            3 => Self::Group,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::GuildStageVoice,
            14 => Self::GuildDirectory,
            15 => Self::GuildForum,
            16 => Self::GuildMedia,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ChannelType> for u16 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::GuildText => 0,
            ChannelType::Private => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::Group => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildAnnouncement => 5,
            ChannelType::AnnouncementThread => 10,
            ChannelType::PublicThread => 11,
            ChannelType::PrivateThread => 12,
            ChannelType::GuildStageVoice => 13,
            ChannelType::GuildDirectory => 14,
            ChannelType::GuildForum => 15,
            ChannelType::GuildMedia => 16,
            ChannelType::Unknown(unknown) => unknown,
        }
    }
}
