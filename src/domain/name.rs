//! PersonName value object and the letter policy it is checked against.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Letter class accepted in names unless configured otherwise (Cyrillic).
pub const DEFAULT_NAME_LETTERS: &str = "А-ЯЁа-яё";

/// Maximum number of characters in a first or last name.
pub const NAME_MAX_CHARS: usize = 100;

static DEFAULT_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    NamePolicy::compile(DEFAULT_NAME_LETTERS).expect("Failed to compile default name regex")
});

/// The set of letters a name may be made of.
///
/// A name must consist of two or more characters from the letter class,
/// and nothing else.
#[derive(Debug, Clone)]
pub struct NamePolicy {
    letters: String,
    pattern: Regex,
}

impl NamePolicy {
    /// Build a policy from a regex character-class body such as `A-Za-z`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if the class does not compile.
    pub fn new(letters: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            letters: letters.to_string(),
            pattern: Self::compile(letters)?,
        })
    }

    fn compile(letters: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^[{}]{{2,}}$", letters))
    }

    /// The configured letter class.
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Whether a trimmed value is made only of allowed letters, at least two.
    pub fn matches(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            letters: DEFAULT_NAME_LETTERS.to_string(),
            pattern: DEFAULT_NAME_PATTERN.clone(),
        }
    }
}

/// A validated, capitalized first or last name.
///
/// # Example
///
/// ```
/// use contacts_xml::domain::{NamePolicy, PersonName};
///
/// let name = PersonName::new("  иВАН ", &NamePolicy::default()).unwrap();
/// assert_eq!(name.as_str(), "Иван");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and normalize a raw name.
    ///
    /// # Validation Rules
    ///
    /// - Surrounding whitespace is ignored
    /// - Must not be empty
    /// - At most [`NAME_MAX_CHARS`] characters
    /// - Only letters of the policy's class, at least two
    ///
    /// # Errors
    ///
    /// Returns `Required`, `TooLong` or `InvalidName`.
    pub fn new(raw: &str, policy: &NamePolicy) -> Result<Self, ValidationError> {
        let value = raw.trim();

        if value.is_empty() {
            return Err(ValidationError::Required);
        }

        if value.chars().count() > NAME_MAX_CHARS {
            return Err(ValidationError::TooLong {
                max: NAME_MAX_CHARS,
            });
        }

        if !policy.matches(value) {
            return Err(ValidationError::InvalidName(value.to_string()));
        }

        Ok(Self(capitalize(value)))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl Serialize for PersonName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyrillic() -> NamePolicy {
        NamePolicy::default()
    }

    #[test]
    fn test_name_capitalized() {
        let name = PersonName::new("иВАНОВ", &cyrillic()).unwrap();
        assert_eq!(name.as_str(), "Иванов");
    }

    #[test]
    fn test_name_trimmed() {
        let name = PersonName::new("  пётр\t", &cyrillic()).unwrap();
        assert_eq!(name.as_str(), "Пётр");
    }

    #[test]
    fn test_name_normalization_idempotent() {
        for raw in ["иван", "ЁЖИК", "аня", "Мария"] {
            let once = PersonName::new(raw, &cyrillic()).unwrap();
            let twice = PersonName::new(once.as_str(), &cyrillic()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_name_rejects_empty_and_whitespace() {
        assert_eq!(
            PersonName::new("", &cyrillic()),
            Err(ValidationError::Required)
        );
        assert_eq!(
            PersonName::new("   ", &cyrillic()),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn test_name_rejects_wrong_script_and_short() {
        assert!(matches!(
            PersonName::new("Ivan", &cyrillic()),
            Err(ValidationError::InvalidName(_))
        ));
        assert!(matches!(
            PersonName::new("я", &cyrillic()),
            Err(ValidationError::InvalidName(_))
        ));
        assert!(matches!(
            PersonName::new("Анна-Мария", &cyrillic()),
            Err(ValidationError::InvalidName(_))
        ));
        assert!(matches!(
            PersonName::new("Иван Петров", &cyrillic()),
            Err(ValidationError::InvalidName(_))
        ));
    }

    #[test]
    fn test_name_too_long() {
        let raw = "а".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(
            PersonName::new(&raw, &cyrillic()),
            Err(ValidationError::TooLong {
                max: NAME_MAX_CHARS
            })
        );
        assert!(PersonName::new(&"а".repeat(NAME_MAX_CHARS), &cyrillic()).is_ok());
    }

    #[test]
    fn test_custom_letter_policy() {
        let latin = NamePolicy::new("A-Za-z").unwrap();
        assert_eq!(latin.letters(), "A-Za-z");
        assert_eq!(PersonName::new("jOHN", &latin).unwrap().as_str(), "John");
        assert!(PersonName::new("Иван", &latin).is_err());
    }

    #[test]
    fn test_invalid_letter_policy() {
        assert!(NamePolicy::new("z-a").is_err());
    }

    #[test]
    fn test_name_serialization() {
        let name = PersonName::new("иван", &cyrillic()).unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Иван\"");
    }
}
