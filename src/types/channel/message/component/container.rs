use super::Component;
use serde::{Deserialize, Serialize};

/// Visually grouped list of components with an optional accent bar.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoiler: Option<bool>,
    pub components: Vec<Component>,
}

impl Container {
    pub const fn new(components: Vec<Component>) -> Self {
        Self {
            id: None,
            accent_color: None,
            spoiler: None,
            components,
        }
    }
}
