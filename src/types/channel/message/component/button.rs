use crate::types::{
    id::{
        marker::{EmojiMarker, SkuMarker},
        Id,
    },
    util::is_false,
};
use serde::{Deserialize, Serialize, Serializer};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Clickable component that triggers an interaction or opens a URL.
///
/// # Style defaulting
///
/// A button without a [`style`] is encoded as [`ButtonStyle::Primary`]. The
/// in-memory value is not modified by encoding; use
/// [`with_default_style`] to normalise a value explicitly. Decoding the
/// encoded form yields `Some(ButtonStyle::Primary)`, which then encodes
/// identically.
///
/// [`style`]: Self::style
/// [`with_default_style`]: Self::with_default_style
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Button {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Required for every style except link and premium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<EmojiRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, serialize_with = "serialize_style")]
    pub style: Option<ButtonStyle>,
    /// Only for [`ButtonStyle::Link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Only for [`ButtonStyle::Premium`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<Id<SkuMarker>>,
}

impl Button {
    /// Interactive button with a custom ID.
    pub fn new(style: ButtonStyle, custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: Some(custom_id.into()),
            style: Some(style),
            ..Self::default()
        }
    }

    /// Link button; link buttons carry a URL instead of a custom ID.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            style: Some(ButtonStyle::Link),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Style that will be sent on the wire.
    pub fn effective_style(&self) -> ButtonStyle {
        self.style.unwrap_or_default()
    }

    /// Return the button with an unset style replaced by the default.
    #[must_use]
    pub fn with_default_style(mut self) -> Self {
        self.style = Some(self.effective_style());
        self
    }
}

fn serialize_style<S: Serializer>(
    style: &Option<ButtonStyle>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    style.unwrap_or_default().serialize(serializer)
}

/// Visual style of a [`Button`].
#[derive(
    Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr,
)]
#[repr(u8)]
pub enum ButtonStyle {
    #[default]
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
    Premium = 6,
}

/// Emoji shown on a button or select option: either custom (ID) or
/// unicode (name only).
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EmojiRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<EmojiMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub animated: bool,
}

impl EmojiRef {
    /// Unicode emoji.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
