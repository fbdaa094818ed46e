//! Responses sent back to Discord for an interaction.

use crate::types::channel::message::{
    component::{Component, ModalComponent},
    MessageFlags,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// An interaction response sent back to Discord.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseData>,
}

impl InteractionResponse {
    /// Acknowledge a ping.
    pub const fn pong() -> Self {
        Self {
            kind: InteractionCallbackType::Pong,
            data: None,
        }
    }

    /// Reply with a new message.
    pub fn message(data: InteractionCallbackData) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionResponseData::Message(data)),
        }
    }

    /// Reply with a plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self::message(InteractionCallbackData::new().content(content))
    }

    /// Edit the message the component was attached to.
    pub fn update(data: InteractionCallbackData) -> Self {
        Self {
            kind: InteractionCallbackType::UpdateMessage,
            data: Some(InteractionResponseData::Message(data)),
        }
    }

    /// Show a loading state; the reply is sent later as a follow-up.
    pub fn deferred(ephemeral: bool) -> Self {
        let data = ephemeral.then(|| InteractionResponseData::Message(InteractionCallbackData::new().ephemeral()));

        Self {
            kind: InteractionCallbackType::DeferredChannelMessageWithSource,
            data,
        }
    }

    /// Acknowledge a component without visible change.
    pub const fn deferred_update() -> Self {
        Self {
            kind: InteractionCallbackType::DeferredUpdateMessage,
            data: None,
        }
    }

    /// Open a modal.
    pub fn modal(
        custom_id: impl Into<String>,
        title: impl Into<String>,
        components: Vec<ModalComponent>,
    ) -> Self {
        Self {
            kind: InteractionCallbackType::Modal,
            data: Some(InteractionResponseData::Modal(ModalCallbackData {
                custom_id: custom_id.into(),
                title: title.into(),
                components,
            })),
        }
    }

    /// Suggest choices for the focused autocomplete option.
    pub fn autocomplete(choices: Vec<CommandOptionChoice>) -> Self {
        Self {
            kind: InteractionCallbackType::ApplicationCommandAutocompleteResult,
            data: Some(InteractionResponseData::Autocomplete(AutocompleteCallbackData {
                choices,
            })),
        }
    }
}

/// The type of callback for an interaction response.
#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

/// Data of an [`InteractionResponse`], shaped by its callback type.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InteractionResponseData {
    Modal(ModalCallbackData),
    Autocomplete(AutocompleteCallbackData),
    Message(InteractionCallbackData),
}

/// Message sent or edited by a response.
///
/// Supports `Default` for construction with struct update syntax.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InteractionCallbackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl InteractionCallbackData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append a top-level component.
    #[must_use]
    pub fn component(mut self, component: Component) -> Self {
        self.components.get_or_insert_with(Vec::new).push(component);
        self
    }

    /// Only show the message to the invoking user.
    #[must_use]
    pub fn ephemeral(self) -> Self {
        self.flag(MessageFlags::EPHEMERAL)
    }

    /// Lay the message out with components only.
    #[must_use]
    pub fn components_v2(self) -> Self {
        self.flag(MessageFlags::IS_COMPONENTS_V2)
    }

    fn flag(mut self, flag: MessageFlags) -> Self {
        self.flags = Some(self.flags.unwrap_or_default() | flag);
        self
    }
}

/// Modal opened by a response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModalCallbackData {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ModalComponent>,
}

/// Suggestions for an autocomplete interaction.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AutocompleteCallbackData {
    pub choices: Vec<CommandOptionChoice>,
}

/// Suggested option value; `value` is a string or a number matching the
/// option's type.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CommandOptionChoice {
    pub name: String,
    pub value: Value,
}

impl CommandOptionChoice {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CommandOptionChoice, InteractionCallbackData, InteractionCallbackType,
        InteractionResponse, InteractionResponseData,
    };
    use crate::types::{
        builders::{label, text_input},
        channel::message::{component::TextInputStyle, MessageFlags},
    };
    use serde_json::json;
    use serde_test::Token;

    #[test]
    fn interaction_callback_type() {
        serde_test::assert_tokens(&InteractionCallbackType::ChannelMessageWithSource, &[Token::U8(4)]);
        serde_test::assert_tokens(&InteractionCallbackType::Modal, &[Token::U8(9)]);
    }

    #[test]
    fn ephemeral_sets_flag() {
        let data = InteractionCallbackData::new().content("secret").ephemeral();

        assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
        assert_eq!(
            serde_json::to_value(InteractionResponse::message(data)).unwrap(),
            json!({ "type": 4, "data": { "content": "secret", "flags": 64 } })
        );
    }

    #[test]
    fn flags_accumulate() {
        let data = InteractionCallbackData::new().ephemeral().components_v2();

        assert_eq!(
            data.flags,
            Some(MessageFlags::EPHEMERAL | MessageFlags::IS_COMPONENTS_V2)
        );
    }

    #[test]
    fn pong_has_no_data() {
        assert_eq!(serde_json::to_value(InteractionResponse::pong()).unwrap(), json!({ "type": 1 }));
    }

    #[test]
    fn modal_response() {
        let response = InteractionResponse::modal(
            "report",
            "Report a bug",
            vec![label("Details", text_input("details", TextInputStyle::Paragraph, true))],
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["type"], 9);
        assert_eq!(value["data"]["components"][0]["type"], 18);
        assert_eq!(value["data"]["components"][0]["component"]["style"], 2);

        let decoded: InteractionResponse = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn autocomplete_response() {
        let response = InteractionResponse::autocomplete(vec![
            CommandOptionChoice::new("Rust", "rust"),
            CommandOptionChoice::new("Ten", 10),
        ]);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "type": 8,
                "data": { "choices": [{ "name": "Rust", "value": "rust" }, { "name": "Ten", "value": 10 }] },
            })
        );
    }

    #[test]
    fn deferred_ephemeral() {
        let response = InteractionResponse::deferred(true);

        assert!(matches!(
            response.data,
            Some(InteractionResponseData::Message(ref data)) if data.flags == Some(MessageFlags::EPHEMERAL)
        ));
        assert!(InteractionResponse::deferred(false).data.is_none());
    }
}
