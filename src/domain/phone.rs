//! PhoneNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum length of the phone number as entered, separators included.
pub const PHONE_MAX_CHARS: usize = 18;

// `+7` and ten digits grouped 3-3-2-2 with optional single spaces,
// or `8` and ten digits with no separators at all.
static PHONE_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+7 ?[0-9]{3} ?[0-9]{3} ?[0-9]{2} ?[0-9]{2}|8[0-9]{10})$")
        .expect("Failed to compile phone regex")
});

/// A validated phone number in canonical form: 11 digits starting with `8`.
///
/// # Example
///
/// ```
/// use contacts_xml::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+7 900 123 45 67").unwrap();
/// assert_eq!(phone.as_str(), "89001234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format and normalizing it.
    ///
    /// # Validation Rules
    ///
    /// - Surrounding whitespace is ignored
    /// - At most [`PHONE_MAX_CHARS`] characters
    /// - `+7 900 000 00 00` (spaces optional) or `89000000000`
    ///
    /// # Errors
    ///
    /// Returns `Required`, `TooLong` or `InvalidPhone`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let phone = raw.trim();

        if phone.is_empty() {
            return Err(ValidationError::Required);
        }

        if phone.chars().count() > PHONE_MAX_CHARS {
            return Err(ValidationError::TooLong {
                max: PHONE_MAX_CHARS,
            });
        }

        if !PHONE_SHAPE_REGEX.is_match(phone) {
            return Err(ValidationError::InvalidPhone(phone.to_string()));
        }

        Ok(Self(Self::normalize(phone)))
    }

    /// Strip spaces and rewrite a leading `+7` as `8`.
    fn normalize(phone: &str) -> String {
        let compact: String = phone.chars().filter(|c| *c != ' ').collect();
        match compact.strip_prefix("+7") {
            Some(rest) => format!("8{}", rest),
            None => compact,
        }
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
