//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
///
/// The display text is the user-facing message for a single field; the field
/// name itself is added by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field key was not supplied at all.
    Missing,

    /// The field was supplied but is empty after trimming.
    Required,

    /// The value exceeds the maximum number of characters.
    TooLong { max: usize },

    /// The provided name does not match the configured letter pattern.
    InvalidName(String),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// The provided document file name is not a plain `.xml` name.
    InvalidDocumentName(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "field is missing"),
            Self::Required => write!(f, "this field is required"),
            Self::TooLong { max } => write!(f, "must be at most {} characters", max),
            Self::InvalidName(_) => write!(
                f,
                "must contain only letters of the allowed alphabet, at least 2"
            ),
            Self::InvalidEmail(_) => write!(
                f,
                "enter a valid email address (for example: ivan@example.com)"
            ),
            Self::InvalidPhone(_) => write!(
                f,
                "phone must be in the format +7 900 000 00 00 or 89000000000"
            ),
            Self::InvalidDocumentName(name) => write!(f, "invalid document name: {}", name),
        }
    }
}

impl std::error::Error for ValidationError {}
