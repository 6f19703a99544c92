//! Domain value objects and types.
//!
//! This module contains the field validators for a contact: names, email
//! addresses and phone numbers, plus the names of stored documents. Each value
//! object validates and normalizes at construction time, so an instance is
//! always in canonical form.

pub mod document_name;
pub mod email;
pub mod errors;
pub mod name;
pub mod phone;

pub use document_name::DocumentName;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use name::{NamePolicy, PersonName};
pub use phone::PhoneNumber;
