//! Errors returned when decoding polymorphic payloads.

use crate::types::channel::message::component::ComponentType;
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Decoding context a component is read in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Capability {
    /// Components that may appear in a sent message.
    Message,
    /// Components that may appear in a modal.
    Modal,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Message => f.write_str("message"),
            Self::Modal => f.write_str("modal"),
        }
    }
}

/// Reason a polymorphic payload couldn't be decoded.
///
/// Nothing is partially constructed on failure: the caller either receives a
/// fully decoded value or this error.
#[derive(Debug)]
pub struct DecodeError {
    /// Type of error that occurred.
    kind: DecodeErrorType,
    /// Source of the error, if there is any.
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl DecodeError {
    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &DecodeErrorType {
        &self.kind
    }

    /// Consume the error, returning the source error if there is any.
    #[must_use = "consuming the error and retrieving the source has no effect if left unused"]
    pub fn into_source(self) -> Option<Box<dyn Error + Send + Sync>> {
        self.source
    }

    /// Consume the error, returning the owned error type and the source error.
    #[must_use = "consuming the error into its parts has no effect if left unused"]
    pub fn into_parts(self) -> (DecodeErrorType, Option<Box<dyn Error + Send + Sync>>) {
        (self.kind, self.source)
    }

    pub(crate) const fn missing_discriminant(expected: Capability) -> Self {
        Self {
            kind: DecodeErrorType::MissingDiscriminant { expected },
            source: None,
        }
    }

    pub(crate) const fn unknown_variant(expected: Capability, discriminant: u64) -> Self {
        Self {
            kind: DecodeErrorType::UnknownVariant {
                expected,
                discriminant,
            },
            source: None,
        }
    }

    pub(crate) const fn type_mismatch(expected: Capability, found: ComponentType) -> Self {
        Self {
            kind: DecodeErrorType::TypeMismatch { expected, found },
            source: None,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            DecodeErrorType::Json => f.write_str("payload does not match the expected shape"),
            DecodeErrorType::MissingDiscriminant { expected } => {
                write!(f, "{expected} component is missing an integer `type` field")
            }
            DecodeErrorType::TypeMismatch { expected, found } => {
                write!(f, "component type {found:?} can't be used in a {expected}")
            }
            DecodeErrorType::UnknownVariant {
                expected,
                discriminant,
            } => write!(f, "unknown {expected} component type {discriminant}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn Error + 'static))
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            kind: DecodeErrorType::Json,
            source: Some(Box::new(source)),
        }
    }
}

/// Type of [`DecodeError`] that occurred.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeErrorType {
    /// Fields didn't match the shape of the selected variant, or a nested
    /// value failed to decode. The source holds the underlying error.
    Json,
    /// The object has no integer `type` field.
    MissingDiscriminant { expected: Capability },
    /// The discriminant names a component that isn't allowed in this context,
    /// such as a label inside an action row.
    TypeMismatch {
        expected: Capability,
        found: ComponentType,
    },
    /// The discriminant doesn't match any known component.
    UnknownVariant {
        expected: Capability,
        discriminant: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::{Capability, DecodeError, DecodeErrorType};
    use crate::types::channel::message::component::ComponentType;
    use static_assertions::assert_impl_all;
    use std::error::Error;

    assert_impl_all!(DecodeError: Error, Send, Sync);

    #[test]
    fn unknown_variant_display() {
        let err = DecodeError::unknown_variant(Capability::Message, 99);

        assert_eq!(err.to_string(), "unknown message component type 99");
        assert!(err.source().is_none());
    }

    #[test]
    fn type_mismatch_display() {
        let err = DecodeError::type_mismatch(Capability::Message, ComponentType::Label);

        assert_eq!(err.to_string(), "component type Label can't be used in a message");
    }

    #[test]
    fn json_error_keeps_source() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = DecodeError::from(source);
        let (kind, source) = err.into_parts();

        assert!(matches!(kind, DecodeErrorType::Json));
        assert!(source.is_some());
    }
}
