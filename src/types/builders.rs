//! Helper functions for building components.
//!
//! These construct [`Component`] and [`ModalComponent`] variants directly,
//! hiding the per-variant struct construction:
//!
//! ```
//! use snowcord::types::{
//!     builders::{action_row, button},
//!     channel::message::component::ButtonStyle,
//! };
//!
//! let row = action_row(vec![
//!     button(ButtonStyle::Success, "Yes", "vote:yes"),
//!     button(ButtonStyle::Danger, "No", "vote:no"),
//! ]);
//! ```

use crate::types::channel::message::component::{
    ActionRow, Button, ButtonStyle, Component, Label, ModalComponent, SelectMenu, SelectMenuOption,
    TextDisplay, TextInput, TextInputStyle,
};

/// Build an action row wrapping other components.
pub fn action_row(components: Vec<Component>) -> Component {
    Component::ActionRow(ActionRow::new(components))
}

/// Build an interactive button.
///
/// For link buttons, use [`link_button`] instead.
pub fn button(
    style: ButtonStyle,
    label: impl Into<String>,
    custom_id: impl Into<String>,
) -> Component {
    Component::Button(Button {
        label: Some(label.into()),
        ..Button::new(style, custom_id)
    })
}

/// Build a link button (no custom ID, opens `url`).
pub fn link_button(label: impl Into<String>, url: impl Into<String>) -> Component {
    Component::Button(Button::link(label, url))
}

/// Build a single-choice string select menu.
pub fn string_select(
    custom_id: impl Into<String>,
    placeholder: impl Into<String>,
    options: Vec<SelectMenuOption>,
) -> Component {
    Component::SelectMenu(SelectMenu {
        placeholder: Some(placeholder.into()),
        min_values: Some(1),
        max_values: Some(1),
        options,
        ..SelectMenu::new(custom_id)
    })
}

/// Build a text input for a modal. Wrap it in a [`label`].
pub fn text_input(custom_id: impl Into<String>, style: TextInputStyle, required: bool) -> TextInput {
    TextInput {
        required: Some(required),
        ..TextInput::new(custom_id, style)
    }
}

/// Build a labelled modal field.
pub fn label(text: impl Into<String>, component: impl Into<ModalComponent>) -> ModalComponent {
    ModalComponent::Label(Label::new(text, component))
}

/// Build a markdown text block.
pub fn text_display(content: impl Into<String>) -> Component {
    Component::TextDisplay(TextDisplay::new(content))
}
