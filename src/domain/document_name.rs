//! DocumentName value object.

use super::errors::ValidationError;
use std::fmt;
use uuid::Uuid;

/// File extension of every stored contacts document.
pub const DOCUMENT_EXTENSION: &str = ".xml";

/// Extension of an upload that has been validated but not yet promoted.
pub const STAGING_EXTENSION: &str = ".upload";

/// A type-safe wrapper for stored document file names.
///
/// A document name is a single plain path component ending in `.xml`.
/// New names are random UUIDs and are never reused.
///
/// # Example
///
/// ```
/// use contacts_xml::domain::DocumentName;
///
/// let name = DocumentName::parse("contacts.xml").unwrap();
/// assert_eq!(name.as_str(), "contacts.xml");
/// assert!(DocumentName::parse("../secret.xml").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentName(String);

impl DocumentName {
    /// Generate a fresh, globally unique document name.
    pub fn generate() -> Self {
        Self(format!("{}{}", Uuid::new_v4(), DOCUMENT_EXTENSION))
    }

    /// Accept an existing name, validating that it is a plain `.xml` file name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDocumentName` for empty names, names with
    /// path separators, hidden names, or names without the `.xml` extension.
    pub fn parse(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let stem = name.strip_suffix(DOCUMENT_EXTENSION).unwrap_or("");

        if stem.is_empty() || !is_plain_file_name(&name) {
            return Err(ValidationError::InvalidDocumentName(name));
        }

        Ok(Self(name))
    }

    /// Name under which this document is staged before promotion.
    pub fn staging_name(&self) -> String {
        let stem = self
            .0
            .strip_suffix(DOCUMENT_EXTENSION)
            .unwrap_or(self.0.as_str());
        format!("{}{}", stem, STAGING_EXTENSION)
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

/// Whether `name` is one visible path component with no separators.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_unique_xml() {
        let a = DocumentName::generate();
        let b = DocumentName::generate();
        assert_ne!(a, b);
        assert!(a.as_str().ends_with(".xml"));
        assert_eq!(a.as_str().len(), 36 + 4);
        assert!(DocumentName::parse(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_rejects_unsafe_names() {
        assert!(DocumentName::parse("").is_err());
        assert!(DocumentName::parse(".xml").is_err());
        assert!(DocumentName::parse("notes.txt").is_err());
        assert!(DocumentName::parse("../x.xml").is_err());
        assert!(DocumentName::parse("dir/x.xml").is_err());
        assert!(DocumentName::parse("dir\\x.xml").is_err());
        assert!(DocumentName::parse(".hidden.xml").is_err());
        assert!(DocumentName::parse("x.xml.upload").is_err());
    }

    #[test]
    fn test_staging_name() {
        let name = DocumentName::parse("abc.xml").unwrap();
        assert_eq!(name.staging_name(), "abc.upload");
    }

    #[test]
    fn test_plain_file_name() {
        assert!(is_plain_file_name("abc.upload"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("a/b"));
    }
}
