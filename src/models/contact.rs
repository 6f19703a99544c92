//! Contact record and the raw field mapping it is validated from.

use crate::domain::{EmailAddress, PersonName, PhoneNumber};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One of the four fields of a contact, named by its XML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl ContactField {
    /// Every field, in serialization order.
    pub const ALL: [ContactField; 4] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Phone,
    ];

    /// The XML tag (and form key) of this field.
    pub fn tag(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        }
    }

    /// Look up a field by its tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.tag() == tag)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unvalidated contact input, keyed by field.
///
/// Built from submitted form values or from the child elements of a
/// `<contact>` node. An absent key and an empty value are different things.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContact {
    fields: HashMap<ContactField, String>,
}

impl RawContact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: ContactField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

impl FromIterator<(ContactField, String)> for RawContact {
    fn from_iter<I: IntoIterator<Item = (ContactField, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A fully validated, normalized contact.
///
/// Only produced by the contact validator; every field is already in its
/// canonical stored form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContactRecord {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}

impl ContactRecord {
    /// Text value of a field.
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => self.first_name.as_str(),
            ContactField::LastName => self.last_name.as_str(),
            ContactField::Email => self.email.as_str(),
            ContactField::Phone => self.phone.as_str(),
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The record as raw input, e.g. to re-run validation on it.
    pub fn to_raw(&self) -> RawContact {
        ContactField::ALL
            .into_iter()
            .map(|field| (field, self.value(field).to_string()))
            .collect()
    }
}
