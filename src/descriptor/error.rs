use crate::descriptor::value::ValueKind;
use thiserror::Error;

/// Errors surfaced by property descriptors and the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    /// The instance's runtime type is not the property's declaring type.
    #[error("property `{property}` is declared on `{expected}` and cannot access this instance")]
    Access {
        property: String,
        expected: &'static str,
    },
    /// The property is read-only; nothing was written.
    #[error("property `{0}` is read-only")]
    ReadOnly(String),
    /// `reset` was requested before `can_reset` captured a default.
    #[error("property `{0}` has no captured default value")]
    NoDefaultCaptured(String),
    #[error("expected a {expected} value, found {found}")]
    ValueKind { expected: ValueKind, found: ValueKind },
    #[error("no property named `{0}`")]
    UnknownProperty(String),
    /// The registry has no descriptor for the instance's type.
    #[error("no type descriptor installed for this object")]
    NotDescribed,
    #[error("property `{0}` has no nested properties")]
    NotExpandable(String),
    /// A choice or index outside the allowed set.
    #[error("`{0}` is not an allowed choice")]
    InvalidChoice(String),
    /// Strict text edits surface the converter's failure instead of keeping the old value.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Parse/format failure inside a value converter.
///
/// Never escapes `ValueConverter::convert_from`; callers only see the previous value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert `{input}` to {target}: {reason}")]
pub struct ConversionError {
    pub input: String,
    pub target: ValueKind,
    pub reason: String,
}

impl ConversionError {
    pub fn new(input: &str, target: ValueKind, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            target,
            reason: reason.into(),
        }
    }
}
