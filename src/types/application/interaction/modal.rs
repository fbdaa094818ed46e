//! Data of a modal submit interaction.

use crate::types::channel::message::component::{Component, ModalComponent};
use serde::{Deserialize, Serialize};

/// Submitted modal: its custom ID and the components with their values.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModalInteractionData {
    pub custom_id: String,
    pub components: Vec<ModalComponent>,
}

impl ModalInteractionData {
    /// `(custom_id, value)` of every submitted text input, in order.
    ///
    /// Inputs are found inside labels and legacy action rows alike.
    pub fn text_values(&self) -> Vec<(&str, &str)> {
        let mut values = Vec::new();
        for component in &self.components {
            collect_text(component, &mut values);
        }

        values
    }

    /// Submitted value of the text input with the given custom ID.
    pub fn value(&self, custom_id: &str) -> Option<&str> {
        self.text_values()
            .into_iter()
            .find_map(|(id, value)| (id == custom_id).then_some(value))
    }

    /// Values selected in the select menu or file upload with the given
    /// custom ID.
    pub fn selected(&self, custom_id: &str) -> Option<&[String]> {
        self.components
            .iter()
            .find_map(|component| find_selected(component, custom_id))
    }
}

fn collect_text<'a>(component: &'a ModalComponent, values: &mut Vec<(&'a str, &'a str)>) {
    match component {
        ModalComponent::TextInput(input) => {
            if let Some(value) = &input.value {
                values.push((&input.custom_id, value));
            }
        }
        ModalComponent::Label(label) => collect_text(&label.component, values),
        ModalComponent::ActionRow(row) => {
            for child in &row.components {
                if let Component::TextInput(input) = child {
                    if let Some(value) = &input.value {
                        values.push((&input.custom_id, value));
                    }
                }
            }
        }
        _ => {}
    }
}

fn find_selected<'a>(component: &'a ModalComponent, custom_id: &str) -> Option<&'a [String]> {
    match component {
        ModalComponent::SelectMenu(menu) if menu.custom_id == custom_id => Some(&menu.values),
        ModalComponent::FileUpload(upload) if upload.custom_id == custom_id => {
            Some(&upload.values)
        }
        ModalComponent::Label(label) => find_selected(&label.component, custom_id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::ModalInteractionData;
    use serde_json::json;

    fn submitted() -> ModalInteractionData {
        serde_json::from_value(json!({
            "custom_id": "report",
            "components": [
                {
                    "type": 1,
                    "components": [{ "type": 4, "custom_id": "title", "value": "Broken link" }],
                },
                {
                    "type": 18,
                    "label": "Details",
                    "component": { "type": 4, "custom_id": "details", "value": "404 on /docs" },
                },
                {
                    "type": 18,
                    "label": "Severity",
                    "component": { "type": 3, "custom_id": "severity", "values": ["high"] },
                },
                {
                    "type": 18,
                    "label": "Screenshot",
                    "component": { "type": 19, "custom_id": "shot", "values": ["111"] },
                },
                { "type": 10, "content": "Thanks!" },
            ],
        }))
        .unwrap()
    }

    #[test]
    fn text_values_flatten_rows_and_labels() {
        let data = submitted();

        assert_eq!(
            data.text_values(),
            [("title", "Broken link"), ("details", "404 on /docs")]
        );
        assert_eq!(data.value("details"), Some("404 on /docs"));
        assert_eq!(data.value("missing"), None);
    }

    #[test]
    fn selected_values() {
        let data = submitted();

        assert_eq!(data.selected("severity"), Some(&["high".to_owned()][..]));
        assert_eq!(data.selected("shot"), Some(&["111".to_owned()][..]));
        assert!(data.selected("title").is_none());
    }

    #[test]
    fn message_only_component_is_rejected() {
        let result = serde_json::from_value::<ModalInteractionData>(json!({
            "custom_id": "m",
            "components": [{ "type": 17, "components": [] }],
        }));

        assert!(result.is_err());
    }
}
