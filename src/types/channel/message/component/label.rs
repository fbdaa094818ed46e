use super::ModalComponent;
use serde::{Deserialize, Serialize};

/// Modal wrapper giving exactly one interactive child a label and an
/// optional description.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component: Box<ModalComponent>,
}

impl Label {
    pub fn new(label: impl Into<String>, component: impl Into<ModalComponent>) -> Self {
        Self {
            id: None,
            label: label.into(),
            description: None,
            component: Box::new(component.into()),
        }
    }
}
