//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum total length of an email address.
pub const EMAIL_MAX_CHARS: usize = 320;

static LOCAL_PART_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("Failed to compile email local part regex")
});

// Labels may use any Unicode letters, so internationalized domains such as
// `почта.рф` are accepted as written.
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+\p{L}{2,63}$")
        .expect("Failed to compile email domain regex")
});

/// A type-safe wrapper for email addresses.
///
/// This ensures that email addresses are validated at construction time.
///
/// # Example
///
/// ```
/// use contacts_xml::domain::EmailAddress;
///
/// let email = EmailAddress::new(" user@example.com ").unwrap();
/// assert_eq!(email.as_str(), "user@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Surrounding whitespace is ignored, the value is otherwise kept as-is
    /// - Must contain exactly one '@' symbol
    /// - Local part is a dot-atom (no leading, trailing or doubled dots)
    /// - Domain has at least two labels and ends in an alphabetic label;
    ///   labels may contain non-ASCII letters
    ///
    /// # Errors
    ///
    /// Returns `Required`, `TooLong` or `InvalidEmail`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim();

        if email.is_empty() {
            return Err(ValidationError::Required);
        }

        if email.chars().count() > EMAIL_MAX_CHARS {
            return Err(ValidationError::TooLong {
                max: EMAIL_MAX_CHARS,
            });
        }

        if !Self::is_valid(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }

        Ok(Self(email.to_string()))
    }

    /// Validate email format.
    fn is_valid(email: &str) -> bool {
        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };

        LOCAL_PART_REGEX.is_match(local) && DOMAIN_REGEX.is_match(domain)
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::new(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
