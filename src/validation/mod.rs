//! The contact validation engine.
//!
//! - **record**: one contact's fields to a normalized [`ContactRecord`](crate::models::ContactRecord)
//! - **document**: a whole XML document to a [`ValidationResult`]

pub mod document;
pub mod record;

pub use document::{validate_document, Rejection, RejectionKind, StructureMismatch, ValidationResult};
pub use record::{ContactValidator, FieldError, FieldErrors};
