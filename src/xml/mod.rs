//! XML wire format for contact documents.
//!
//! A document is one root element wrapping one or more `<contact>` elements,
//! each with exactly the four text-only field children.

pub mod serializer;

pub use serializer::{serialize_contact, serialize_contacts};

/// XML declaration written at the top of every generated document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Root element of generated documents.
pub const ROOT_TAG: &str = "contacts";

/// Element holding one contact's fields.
pub const CONTACT_TAG: &str = "contact";
