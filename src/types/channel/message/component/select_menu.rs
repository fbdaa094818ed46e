use super::{ComponentType, EmojiRef};
use crate::types::{
    channel::ChannelType,
    id::{marker::GenericMarker, Id},
    util::is_false,
};
use serde::{Deserialize, Serialize};

/// Dropdown of options or of guild entities.
///
/// One struct serves all five menu kinds; [`kind`] selects which discriminant
/// is written on encode and is filled in from the discriminant on decode.
///
/// [`kind`]: Self::kind
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub custom_id: String,
    #[serde(skip)]
    pub kind: SelectMenuType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    /// Choices of a [`SelectMenuType::Text`] menu.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectMenuOption>,
    /// Channel kinds offered by a [`SelectMenuType::Channel`] menu.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<ChannelType>,
    /// Preselected entities of auto-populated menus.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_values: Vec<SelectDefaultValue>,
    /// Only meaningful inside a modal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Selected values, present when submitted from a modal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl SelectMenu {
    /// Text select menu with no options yet.
    pub fn new(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            ..Self::default()
        }
    }

    /// Add an option to a text select menu.
    #[must_use]
    pub fn option(mut self, option: SelectMenuOption) -> Self {
        self.options.push(option);
        self
    }
}

/// Which entities a [`SelectMenu`] offers.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SelectMenuType {
    /// Developer-defined string options.
    #[default]
    Text,
    User,
    Role,
    Mentionable,
    Channel,
}

impl SelectMenuType {
    /// Discriminant written for this menu kind.
    pub const fn component_type(self) -> ComponentType {
        match self {
            Self::Text => ComponentType::TextSelectMenu,
            Self::User => ComponentType::UserSelectMenu,
            Self::Role => ComponentType::RoleSelectMenu,
            Self::Mentionable => ComponentType::MentionableSelectMenu,
            Self::Channel => ComponentType::ChannelSelectMenu,
        }
    }

    /// Menu kind for a discriminant, if it names a select menu.
    pub const fn from_component_type(kind: ComponentType) -> Option<Self> {
        Some(match kind {
            ComponentType::TextSelectMenu => Self::Text,
            ComponentType::UserSelectMenu => Self::User,
            ComponentType::RoleSelectMenu => Self::Role,
            ComponentType::MentionableSelectMenu => Self::Mentionable,
            ComponentType::ChannelSelectMenu => Self::Channel,
            _ => return None,
        })
    }
}

/// One choice of a text select menu.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectMenuOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<EmojiRef>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

impl SelectMenuOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            default: false,
        }
    }
}

/// Preselected entity of a user, role, mentionable or channel menu.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectDefaultValue {
    pub id: Id<GenericMarker>,
    #[serde(rename = "type")]
    pub kind: SelectDefaultValueType,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectDefaultValueType {
    User,
    Role,
    Channel,
}

#[cfg(test)]
mod tests {
    use super::{SelectDefaultValue, SelectDefaultValueType, SelectMenu, SelectMenuType};
    use crate::types::channel::message::component::ComponentType;
    use serde_json::json;

    #[test]
    fn menu_type_maps_both_ways() {
        for kind in [
            SelectMenuType::Text,
            SelectMenuType::User,
            SelectMenuType::Role,
            SelectMenuType::Mentionable,
            SelectMenuType::Channel,
        ] {
            let component_type = kind.component_type();

            assert!(component_type.is_select_menu());
            assert_eq!(SelectMenuType::from_component_type(component_type), Some(kind));
        }
        assert_eq!(SelectMenuType::from_component_type(ComponentType::Button), None);
    }

    #[test]
    fn kind_is_not_a_field() {
        let value = serde_json::to_value(SelectMenu::new("x")).unwrap();

        assert_eq!(value, json!({ "custom_id": "x" }));
    }

    #[test]
    fn default_value_type_is_lowercase() {
        let value: SelectDefaultValue =
            serde_json::from_value(json!({ "id": "9", "type": "role" })).unwrap();

        assert_eq!(value.kind, SelectDefaultValueType::Role);
    }
}
