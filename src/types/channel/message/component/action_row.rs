use super::Component;
use serde::{Deserialize, Serialize};

/// Non-interactive container of other components.
///
/// In messages a row holds up to five buttons or a single select menu. In
/// legacy modals it holds a single text input.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ActionRow {
    /// Optional identifier for the component within the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ActionRow {
    /// Maximum number of children Discord accepts in a row.
    pub const MAX_COMPONENTS: usize = 5;

    pub const fn new(components: Vec<Component>) -> Self {
        Self {
            id: None,
            components,
        }
    }
}
