use super::Component;
use serde::{Deserialize, Serialize};

/// One to three text displays with an accessory (a button or thumbnail)
/// rendered beside them.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub components: Vec<Component>,
    pub accessory: Box<Component>,
}

impl Section {
    /// Maximum number of text displays in a section.
    pub const MAX_TEXT_DISPLAYS: usize = 3;
}
