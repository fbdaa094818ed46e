//! Serde helpers shared by the model types.
//!
//! Polymorphic payloads are buffered as a [`serde_json::Value`] so the
//! discriminant can be read before the concrete shape is chosen.
//! [`ValueExt::deserialize_into`] then decodes the chosen shape from the
//! buffer without re-parsing text.

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !value
}

/// Extension trait on [`serde_json::Value`] providing
/// `.deserialize_into::<T>()`.
pub(crate) trait ValueExt: Sized {
    /// Consume this value and attempt to deserialize it into `T`.
    fn deserialize_into<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error>;
}

impl ValueExt for serde_json::Value {
    fn deserialize_into<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self)
    }
}
