//! Data of a button press or select menu interaction.

use super::InteractionDataResolved;
use crate::types::channel::message::component::ComponentType;
use serde::{Deserialize, Serialize};

/// Component the user interacted with and what they selected.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageComponentInteractionData {
    pub custom_id: String,
    pub component_type: ComponentType,
    /// Selected option values, for select menus.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Entities selected in auto-populated select menus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<InteractionDataResolved>,
}

impl MessageComponentInteractionData {
    /// Part of the custom ID after the first `:`, if any.
    ///
    /// Components are commonly routed by a `prefix:argument` custom ID.
    pub fn custom_id_argument(&self) -> Option<&str> {
        self.custom_id.split_once(':').map(|(_, argument)| argument)
    }
}

#[cfg(test)]
mod tests {
    use super::MessageComponentInteractionData;
    use crate::types::{channel::message::component::ComponentType, id::Id};
    use serde_json::json;

    #[test]
    fn user_select() {
        let data: MessageComponentInteractionData = serde_json::from_value(json!({
            "custom_id": "assign:moderator",
            "component_type": 5,
            "values": ["41771983423143937"],
            "resolved": {
                "users": {
                    "41771983423143937": { "id": "41771983423143937", "username": "bob" },
                },
            },
        }))
        .unwrap();

        assert_eq!(data.component_type, ComponentType::UserSelectMenu);
        assert_eq!(data.custom_id_argument(), Some("moderator"));
        let resolved = data.resolved.unwrap();
        assert_eq!(resolved.users[&Id::new(41_771_983_423_143_937)].name, "bob");
    }

    #[test]
    fn button_has_no_values() {
        let data: MessageComponentInteractionData =
            serde_json::from_value(json!({ "custom_id": "ok", "component_type": 2 })).unwrap();

        assert!(data.values.is_empty());
        assert!(data.custom_id_argument().is_none());
    }
}
