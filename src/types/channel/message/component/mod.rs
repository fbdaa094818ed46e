//! Interactive message and modal elements.
//!
//! Components travel as `{"type": N, ...fields}`. The structs in this module
//! don't store `type`; it is derived from the enum variant on encode and
//! consumed by the dispatcher on decode. Two closed families exist:
//!
//! - [`Component`]: everything that may appear in a sent message.
//! - [`ModalComponent`]: everything that may appear in a modal.
//!
//! [`SelectMenu`], [`TextInput`] and [`TextDisplay`] belong to both.
//!
//! Decoding buffers the object as a [`serde_json::Value`], reads the
//! discriminant, then decodes the concrete struct from the same buffer.
//! Nested lists reuse the same path, so a bad child fails the whole decode.

mod action_row;
mod button;
mod container;
mod file_upload;
mod label;
mod media;
mod section;
mod select_menu;
mod separator;
mod text_display;
mod text_input;

pub use self::{
    action_row::ActionRow,
    button::{Button, ButtonStyle, EmojiRef},
    container::Container,
    file_upload::FileUpload,
    label::Label,
    media::{FileDisplay, MediaGallery, MediaGalleryItem, Thumbnail, UnfurledMediaItem},
    section::Section,
    select_menu::{
        SelectDefaultValue, SelectDefaultValueType, SelectMenu, SelectMenuOption, SelectMenuType,
    },
    separator::{Separator, SeparatorSpacing},
    text_display::TextDisplay,
    text_input::{TextInput, TextInputStyle},
};

use crate::{
    error::{Capability, DecodeError},
    types::util::ValueExt,
};
use serde::{
    de::{Deserializer, Error as DeError},
    Deserialize, Serialize, Serializer,
};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Wire discriminant of every component kind.
#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    TextSelectMenu = 3,
    TextInput = 4,
    UserSelectMenu = 5,
    RoleSelectMenu = 6,
    MentionableSelectMenu = 7,
    ChannelSelectMenu = 8,
    Section = 9,
    TextDisplay = 10,
    Thumbnail = 11,
    MediaGallery = 12,
    File = 13,
    Separator = 14,
    Container = 17,
    Label = 18,
    FileUpload = 19,
}

impl ComponentType {
    /// Map a raw discriminant to a known kind.
    pub const fn from_discriminant(value: u64) -> Option<Self> {
        Some(match value {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::TextSelectMenu,
            4 => Self::TextInput,
            5 => Self::UserSelectMenu,
            6 => Self::RoleSelectMenu,
            7 => Self::MentionableSelectMenu,
            8 => Self::ChannelSelectMenu,
            9 => Self::Section,
            10 => Self::TextDisplay,
            11 => Self::Thumbnail,
            12 => Self::MediaGallery,
            13 => Self::File,
            14 => Self::Separator,
            17 => Self::Container,
            18 => Self::Label,
            19 => Self::FileUpload,
            _ => return None,
        })
    }

    /// Whether this kind may appear in a sent message.
    pub const fn is_message(self) -> bool {
        !matches!(self, Self::Label | Self::FileUpload)
    }

    /// Whether this kind may appear in a modal.
    pub const fn is_modal(self) -> bool {
        matches!(
            self,
            Self::ActionRow
                | Self::Label
                | Self::TextInput
                | Self::TextDisplay
                | Self::FileUpload
                | Self::TextSelectMenu
                | Self::UserSelectMenu
                | Self::RoleSelectMenu
                | Self::MentionableSelectMenu
                | Self::ChannelSelectMenu
        )
    }

    /// Whether this kind is one of the five select menus.
    pub const fn is_select_menu(self) -> bool {
        SelectMenuType::from_component_type(self).is_some()
    }
}

/// A component that can be sent in a message.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
    Section(Section),
    TextDisplay(TextDisplay),
    Thumbnail(Thumbnail),
    MediaGallery(MediaGallery),
    File(FileDisplay),
    Separator(Separator),
    Container(Container),
}

impl Component {
    /// Wire discriminant of this component.
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(_) => ComponentType::ActionRow,
            Self::Button(_) => ComponentType::Button,
            Self::SelectMenu(menu) => menu.kind.component_type(),
            Self::TextInput(_) => ComponentType::TextInput,
            Self::Section(_) => ComponentType::Section,
            Self::TextDisplay(_) => ComponentType::TextDisplay,
            Self::Thumbnail(_) => ComponentType::Thumbnail,
            Self::MediaGallery(_) => ComponentType::MediaGallery,
            Self::File(_) => ComponentType::File,
            Self::Separator(_) => ComponentType::Separator,
            Self::Container(_) => ComponentType::Container,
        }
    }

    /// Developer-defined identifier, for the kinds that carry one.
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Button(button) => button.custom_id.as_deref(),
            Self::SelectMenu(menu) => Some(&menu.custom_id),
            Self::TextInput(input) => Some(&input.custom_id),
            _ => None,
        }
    }

    /// Check the child-count limits Discord enforces, recursively.
    ///
    /// Decoding never calls this; it is meant for producers before sending.
    pub fn validate(&self) -> Result<(), ComponentValidationError> {
        match self {
            Self::ActionRow(row) => {
                check_count(
                    ComponentType::ActionRow,
                    row.components.len(),
                    ActionRow::MAX_COMPONENTS,
                )?;
                row.components.iter().try_for_each(Self::validate)
            }
            Self::Section(section) => {
                check_count(
                    ComponentType::Section,
                    section.components.len(),
                    Section::MAX_TEXT_DISPLAYS,
                )?;
                section.components.iter().try_for_each(Self::validate)?;
                section.accessory.validate()
            }
            Self::MediaGallery(gallery) => check_count(
                ComponentType::MediaGallery,
                gallery.items.len(),
                MediaGallery::MAX_ITEMS,
            ),
            Self::Container(container) => container.components.iter().try_for_each(Self::validate),
            _ => Ok(()),
        }
    }
}

impl From<ActionRow> for Component {
    fn from(row: ActionRow) -> Self {
        Self::ActionRow(row)
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<SelectMenu> for Component {
    fn from(menu: SelectMenu) -> Self {
        Self::SelectMenu(menu)
    }
}

impl From<TextDisplay> for Component {
    fn from(text: TextDisplay) -> Self {
        Self::TextDisplay(text)
    }
}

/// A component that can be shown in, or submitted from, a modal.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ModalComponent {
    /// Legacy layout: a row holding a single text input.
    ActionRow(ActionRow),
    Label(Label),
    TextInput(TextInput),
    SelectMenu(SelectMenu),
    TextDisplay(TextDisplay),
    FileUpload(FileUpload),
}

impl ModalComponent {
    /// Wire discriminant of this component.
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(_) => ComponentType::ActionRow,
            Self::Label(_) => ComponentType::Label,
            Self::TextInput(_) => ComponentType::TextInput,
            Self::SelectMenu(menu) => menu.kind.component_type(),
            Self::TextDisplay(_) => ComponentType::TextDisplay,
            Self::FileUpload(_) => ComponentType::FileUpload,
        }
    }

    /// Developer-defined identifier, for the kinds that carry one.
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::TextInput(input) => Some(&input.custom_id),
            Self::SelectMenu(menu) => Some(&menu.custom_id),
            Self::FileUpload(upload) => Some(&upload.custom_id),
            _ => None,
        }
    }
}

impl From<Label> for ModalComponent {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

impl From<TextInput> for ModalComponent {
    fn from(input: TextInput) -> Self {
        Self::TextInput(input)
    }
}

impl From<TextDisplay> for ModalComponent {
    fn from(text: TextDisplay) -> Self {
        Self::TextDisplay(text)
    }
}

/// Read the `type` field of a buffered component object.
fn discriminant(value: &Value, expected: Capability) -> Result<ComponentType, DecodeError> {
    let raw = value
        .get("type")
        .and_then(Value::as_u64)
        .ok_or(DecodeError::missing_discriminant(expected))?;

    ComponentType::from_discriminant(raw).ok_or(DecodeError::unknown_variant(expected, raw))
}

fn decode_select_menu(value: Value, kind: ComponentType) -> Result<SelectMenu, DecodeError> {
    let mut menu: SelectMenu = value.deserialize_into()?;
    if let Some(menu_type) = SelectMenuType::from_component_type(kind) {
        menu.kind = menu_type;
    }

    Ok(menu)
}

/// Decode a component that must be usable in a message.
///
/// # Errors
///
/// Returns [`DecodeErrorType::MissingDiscriminant`] if there is no integer
/// `type`, [`DecodeErrorType::UnknownVariant`] if the number is not a known
/// component, [`DecodeErrorType::TypeMismatch`] for modal-only kinds, and
/// [`DecodeErrorType::Json`] if the fields don't fit the selected variant.
///
/// [`DecodeErrorType::Json`]: crate::error::DecodeErrorType::Json
/// [`DecodeErrorType::MissingDiscriminant`]: crate::error::DecodeErrorType::MissingDiscriminant
/// [`DecodeErrorType::TypeMismatch`]: crate::error::DecodeErrorType::TypeMismatch
/// [`DecodeErrorType::UnknownVariant`]: crate::error::DecodeErrorType::UnknownVariant
pub fn decode_component(value: Value) -> Result<Component, DecodeError> {
    let kind = discriminant(&value, Capability::Message)?;

    Ok(match kind {
        ComponentType::ActionRow => Component::ActionRow(value.deserialize_into()?),
        ComponentType::Button => Component::Button(value.deserialize_into()?),
        ComponentType::TextSelectMenu
        | ComponentType::UserSelectMenu
        | ComponentType::RoleSelectMenu
        | ComponentType::MentionableSelectMenu
        | ComponentType::ChannelSelectMenu => {
            Component::SelectMenu(decode_select_menu(value, kind)?)
        }
        ComponentType::TextInput => Component::TextInput(value.deserialize_into()?),
        ComponentType::Section => Component::Section(value.deserialize_into()?),
        ComponentType::TextDisplay => Component::TextDisplay(value.deserialize_into()?),
        ComponentType::Thumbnail => Component::Thumbnail(value.deserialize_into()?),
        ComponentType::MediaGallery => Component::MediaGallery(value.deserialize_into()?),
        ComponentType::File => Component::File(value.deserialize_into()?),
        ComponentType::Separator => Component::Separator(value.deserialize_into()?),
        ComponentType::Container => Component::Container(value.deserialize_into()?),
        ComponentType::Label | ComponentType::FileUpload => {
            return Err(DecodeError::type_mismatch(Capability::Message, kind));
        }
    })
}

/// Decode a component that must be usable in a modal.
///
/// # Errors
///
/// Same as [`decode_component`], with message-only kinds (buttons, sections,
/// media and so on) rejected as a type mismatch.
pub fn decode_modal_component(value: Value) -> Result<ModalComponent, DecodeError> {
    let kind = discriminant(&value, Capability::Modal)?;

    Ok(match kind {
        ComponentType::ActionRow => ModalComponent::ActionRow(value.deserialize_into()?),
        ComponentType::Label => ModalComponent::Label(value.deserialize_into()?),
        ComponentType::TextInput => ModalComponent::TextInput(value.deserialize_into()?),
        ComponentType::TextSelectMenu
        | ComponentType::UserSelectMenu
        | ComponentType::RoleSelectMenu
        | ComponentType::MentionableSelectMenu
        | ComponentType::ChannelSelectMenu => {
            ModalComponent::SelectMenu(decode_select_menu(value, kind)?)
        }
        ComponentType::TextDisplay => ModalComponent::TextDisplay(value.deserialize_into()?),
        ComponentType::FileUpload => ModalComponent::FileUpload(value.deserialize_into()?),
        ComponentType::Button
        | ComponentType::Section
        | ComponentType::Thumbnail
        | ComponentType::MediaGallery
        | ComponentType::File
        | ComponentType::Separator
        | ComponentType::Container => {
            return Err(DecodeError::type_mismatch(Capability::Modal, kind));
        }
    })
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        decode_component(value).map_err(DeError::custom)
    }
}

impl<'de> Deserialize<'de> for ModalComponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        decode_modal_component(value).map_err(DeError::custom)
    }
}

/// Variant fields with the discriminant written in front of them.
#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(flatten)]
    inner: &'a T,
}

fn serialize_tagged<S: Serializer, T: Serialize>(
    serializer: S,
    kind: ComponentType,
    inner: &T,
) -> Result<S::Ok, S::Error> {
    Tagged { kind, inner }.serialize(serializer)
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();

        match self {
            Self::ActionRow(inner) => serialize_tagged(serializer, kind, inner),
            Self::Button(inner) => serialize_tagged(serializer, kind, inner),
            Self::SelectMenu(inner) => serialize_tagged(serializer, kind, inner),
            Self::TextInput(inner) => serialize_tagged(serializer, kind, inner),
            Self::Section(inner) => serialize_tagged(serializer, kind, inner),
            Self::TextDisplay(inner) => serialize_tagged(serializer, kind, inner),
            Self::Thumbnail(inner) => serialize_tagged(serializer, kind, inner),
            Self::MediaGallery(inner) => serialize_tagged(serializer, kind, inner),
            Self::File(inner) => serialize_tagged(serializer, kind, inner),
            Self::Separator(inner) => serialize_tagged(serializer, kind, inner),
            Self::Container(inner) => serialize_tagged(serializer, kind, inner),
        }
    }
}

impl Serialize for ModalComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();

        match self {
            Self::ActionRow(inner) => serialize_tagged(serializer, kind, inner),
            Self::Label(inner) => serialize_tagged(serializer, kind, inner),
            Self::TextInput(inner) => serialize_tagged(serializer, kind, inner),
            Self::SelectMenu(inner) => serialize_tagged(serializer, kind, inner),
            Self::TextDisplay(inner) => serialize_tagged(serializer, kind, inner),
            Self::FileUpload(inner) => serialize_tagged(serializer, kind, inner),
        }
    }
}

fn check_count(
    kind: ComponentType,
    len: usize,
    max: usize,
) -> Result<(), ComponentValidationError> {
    if len > max {
        return Err(ComponentValidationError { kind, len, max });
    }

    Ok(())
}

/// A component holds more children than Discord accepts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ComponentValidationError {
    /// Kind of the offending container.
    pub kind: ComponentType,
    /// Number of children present.
    pub len: usize,
    /// Maximum allowed.
    pub max: usize,
}

impl Display for ComponentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:?} holds {} children but at most {} are allowed",
            self.kind, self.len, self.max
        )
    }
}

impl Error for ComponentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorType;
    use serde_json::json;
    use serde_test::Token;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Component: Clone, Send, Sync);
    assert_impl_all!(ModalComponent: Clone, Send, Sync);

    #[test]
    fn component_type_tokens() {
        serde_test::assert_tokens(&ComponentType::Container, &[Token::U8(17)]);
        serde_test::assert_tokens(&ComponentType::ChannelSelectMenu, &[Token::U8(8)]);
    }

    #[test]
    fn capabilities() {
        for kind in [
            ComponentType::TextSelectMenu,
            ComponentType::TextInput,
            ComponentType::TextDisplay,
        ] {
            assert!(kind.is_message() && kind.is_modal(), "{kind:?}");
        }
        assert!(!ComponentType::Label.is_message());
        assert!(!ComponentType::FileUpload.is_message());
        assert!(!ComponentType::Button.is_modal());
        assert!(!ComponentType::Container.is_modal());
    }

    #[test]
    fn decodes_nested_action_row() {
        let value = json!({
            "type": 1,
            "components": [
                { "type": 2, "style": 1, "label": "Click me!", "custom_id": "click_one" },
                {
                    "type": 3,
                    "custom_id": "class_select_1",
                    "options": [{ "label": "Rogue", "value": "rogue" }],
                },
            ],
        });

        let Component::ActionRow(row) = decode_component(value).unwrap() else {
            panic!("expected action row");
        };

        assert_eq!(row.components.len(), 2);
        assert_eq!(row.components[0].kind(), ComponentType::Button);
        assert_eq!(row.components[1].kind(), ComponentType::TextSelectMenu);
        assert_eq!(row.components[1].custom_id(), Some("class_select_1"));
    }

    #[test]
    fn rejects_unknown_discriminant() {
        let err = decode_component(json!({ "type": 99, "custom_id": "x" })).unwrap_err();

        assert!(matches!(
            err.kind(),
            DecodeErrorType::UnknownVariant {
                expected: Capability::Message,
                discriminant: 99
            }
        ));
    }

    #[test]
    fn rejects_missing_discriminant() {
        let err = decode_component(json!({ "custom_id": "x" })).unwrap_err();

        assert!(matches!(err.kind(), DecodeErrorType::MissingDiscriminant { .. }));
        assert!(decode_component(json!({ "type": "2" })).is_err());
    }

    #[test]
    fn rejects_unknown_nested_child() {
        let value = json!({
            "type": 1,
            "components": [{ "type": 2, "custom_id": "ok" }, { "type": 42 }],
        });
        let err = decode_component(value).unwrap_err();

        assert!(matches!(err.kind(), DecodeErrorType::Json));
        assert!(serde_json::from_value::<Vec<Component>>(json!([{ "type": 42 }])).is_err());
    }

    #[test]
    fn rejects_modal_only_kind_in_message() {
        let value = json!({
            "type": 18,
            "label": "Name",
            "component": { "type": 4, "custom_id": "name", "style": 1 },
        });
        let err = decode_component(value.clone()).unwrap_err();

        assert!(matches!(
            err.kind(),
            DecodeErrorType::TypeMismatch {
                expected: Capability::Message,
                found: ComponentType::Label
            }
        ));
        assert!(decode_modal_component(value).is_ok());
    }

    #[test]
    fn rejects_message_only_kind_in_modal() {
        let err = decode_modal_component(json!({ "type": 2, "custom_id": "b" })).unwrap_err();

        assert!(matches!(
            err.kind(),
            DecodeErrorType::TypeMismatch {
                expected: Capability::Modal,
                found: ComponentType::Button
            }
        ));
    }

    #[test]
    fn round_trip_preserves_discriminants() {
        let fixtures = [
            json!({ "type": 1, "components": [{ "type": 2, "style": 4, "custom_id": "d" }] }),
            json!({ "type": 2, "style": 5, "label": "Docs", "url": "https://discord.com" }),
            json!({ "type": 5, "custom_id": "users", "min_values": 1, "max_values": 3 }),
            json!({ "type": 4, "custom_id": "t", "style": 2, "label": "Why?", "required": true }),
            json!({
                "type": 9,
                "components": [{ "type": 10, "content": "hello" }],
                "accessory": { "type": 11, "media": { "url": "https://x/y.png" } },
            }),
            json!({ "type": 10, "id": 7, "content": "# Title" }),
            json!({
                "type": 12,
                "items": [{ "media": { "url": "https://x/a.png" }, "spoiler": true }],
            }),
            json!({ "type": 13, "file": { "url": "attachment://report.txt" } }),
            json!({ "type": 14, "divider": true, "spacing": 2 }),
            json!({
                "type": 17,
                "accent_color": 703_487,
                "components": [{ "type": 14 }, { "type": 10, "content": "body" }],
            }),
        ];

        for fixture in fixtures {
            let decoded: Component = serde_json::from_value(fixture.clone()).unwrap();
            let encoded = serde_json::to_value(&decoded).unwrap();

            assert_eq!(encoded, fixture);
        }
    }

    #[test]
    fn modal_round_trip() {
        let fixtures = [
            json!({
                "type": 18,
                "label": "Favourite bug",
                "description": "Be honest",
                "component": {
                    "type": 3,
                    "custom_id": "bug",
                    "options": [{ "label": "Ant", "value": "ant" }],
                },
            }),
            json!({ "type": 19, "custom_id": "upload", "min_values": 1, "max_values": 2 }),
            json!({ "type": 1, "components": [{ "type": 4, "custom_id": "a", "style": 1 }] }),
        ];

        for fixture in fixtures {
            let decoded: ModalComponent = serde_json::from_value(fixture.clone()).unwrap();

            assert_eq!(serde_json::to_value(&decoded).unwrap(), fixture);
        }
    }

    #[test]
    fn select_menu_discriminant_follows_menu_type() {
        let mut menu = SelectMenu::new("pick");
        let encoded = serde_json::to_value(Component::SelectMenu(menu.clone())).unwrap();
        assert_eq!(encoded["type"], 3);

        menu.kind = SelectMenuType::Channel;
        let encoded = serde_json::to_value(Component::SelectMenu(menu)).unwrap();
        assert_eq!(encoded["type"], 8);

        let decoded = decode_component(encoded).unwrap();
        assert_eq!(decoded.kind(), ComponentType::ChannelSelectMenu);
    }

    #[test]
    fn button_style_defaults_to_primary_on_encode() {
        let button = Button {
            custom_id: Some("go".to_owned()),
            ..Button::default()
        };
        let component = Component::Button(button);

        let first = serde_json::to_value(&component).unwrap();
        assert_eq!(first["style"], 1);
        // Encoding leaves the value untouched.
        let Component::Button(unchanged) = &component else {
            unreachable!()
        };
        assert!(unchanged.style.is_none());

        let decoded = decode_component(first.clone()).unwrap();
        let Component::Button(decoded_button) = &decoded else {
            panic!("expected button");
        };
        assert_eq!(decoded_button.style, Some(ButtonStyle::Primary));
        assert_eq!(serde_json::to_value(&decoded).unwrap(), first);
    }

    #[test]
    fn validate_enforces_child_limits() {
        let buttons = (0..6)
            .map(|i| Component::Button(Button::new(ButtonStyle::Secondary, format!("b{i}"))))
            .collect();
        let row = Component::ActionRow(ActionRow::new(buttons));
        let err = row.validate().unwrap_err();

        assert_eq!(err.kind, ComponentType::ActionRow);
        assert_eq!(err.len, 6);
        assert_eq!(err.max, ActionRow::MAX_COMPONENTS);

        let nested = Component::Container(Container::new(vec![row]));
        assert!(nested.validate().is_err());

        let ok = Component::ActionRow(ActionRow::new(vec![Component::Button(Button::new(
            ButtonStyle::Success,
            "fine",
        ))]));
        assert!(ok.validate().is_ok());
    }
}
