//! Contact record validation.
//!
//! Checks one contact's field mapping with the field validators and either
//! returns the normalized record or every field that failed.

use crate::domain::{EmailAddress, NamePolicy, PersonName, PhoneNumber, ValidationError};
use crate::models::{ContactField, ContactRecord, RawContact};
use std::fmt;
use thiserror::Error;

/// One failing field and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {error}")]
pub struct FieldError {
    pub field: ContactField,
    pub error: ValidationError,
}

/// Every failing field of one contact, in field order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error for a specific field, if that field failed.
    pub fn get(&self, field: ContactField) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field).map(|e| &e.error)
    }

    /// Names of the failing fields.
    pub fn fields(&self) -> Vec<ContactField> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validates raw contact input into a [`ContactRecord`].
///
/// Holds the name policy so both the add flow and the document validator
/// apply the same rules.
#[derive(Debug, Clone, Default)]
pub struct ContactValidator {
    names: NamePolicy,
}

impl ContactValidator {
    pub fn new(names: NamePolicy) -> Self {
        Self { names }
    }

    pub fn name_policy(&self) -> &NamePolicy {
        &self.names
    }

    /// Validate all four fields; all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns every failing field, not just the first one.
    pub fn validate(&self, raw: &RawContact) -> Result<ContactRecord, FieldErrors> {
        let mut errors = Vec::new();

        let first_name = check(raw, ContactField::FirstName, &mut errors, |v| {
            PersonName::new(v, &self.names)
        });
        let last_name = check(raw, ContactField::LastName, &mut errors, |v| {
            PersonName::new(v, &self.names)
        });
        let email = check(raw, ContactField::Email, &mut errors, EmailAddress::new);
        let phone = check(raw, ContactField::Phone, &mut errors, PhoneNumber::new);

        match (first_name, last_name, email, phone) {
            (Some(first_name), Some(last_name), Some(email), Some(phone)) => Ok(ContactRecord {
                first_name,
                last_name,
                email,
                phone,
            }),
            _ => Err(FieldErrors(errors)),
        }
    }
}

fn check<T>(
    raw: &RawContact,
    field: ContactField,
    errors: &mut Vec<FieldError>,
    validate: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Option<T> {
    let Some(value) = raw.get(field) else {
        errors.push(FieldError {
            field,
            error: ValidationError::Missing,
        });
        return None;
    };

    match validate(value) {
        Ok(valid) => Some(valid),
        Err(error) => {
            errors.push(FieldError { field, error });
            None
        }
    }
}
