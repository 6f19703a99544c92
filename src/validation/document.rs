//! Document structure validation.
//!
//! Parses an XML document, finds every `<contact>` element and checks each one
//! in document order: exact child tags first, then field values. The first
//! failing contact rejects the whole document.

use super::record::{ContactValidator, FieldErrors};
use crate::models::{ContactField, ContactRecord, RawContact};
use crate::xml::CONTACT_TAG;
use roxmltree::{Document, Node};
use std::fmt;
use thiserror::Error;

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every contact passed; records are in document order.
    Valid(Vec<ContactRecord>),
    /// The document is rejected as a whole.
    Invalid(Rejection),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn contacts(&self) -> Option<&[ContactRecord]> {
        match self {
            ValidationResult::Valid(contacts) => Some(contacts),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(rejection) => Some(rejection),
        }
    }

    pub fn into_result(self) -> Result<Vec<ContactRecord>, Rejection> {
        match self {
            ValidationResult::Valid(contacts) => Ok(contacts),
            ValidationResult::Invalid(rejection) => Err(rejection),
        }
    }
}

/// Why a document was rejected. The display text is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The bytes are not well-formed UTF-8 XML.
    #[error("malformed XML: {detail}")]
    Malformed { detail: String },

    /// No `<contact>` element anywhere below the root.
    #[error("no contact element found")]
    NoContacts,

    /// A contact's child tags differ from the required four.
    #[error("contact #{index}: structure mismatch ({mismatch})")]
    Structure {
        index: usize,
        mismatch: StructureMismatch,
    },

    /// A contact's structure is right but one or more values are not.
    #[error("contact #{index}: {errors}")]
    Fields { index: usize, errors: FieldErrors },
}

/// Coarse category of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    MalformedInput,
    StructuralError,
    FieldError,
}

impl RejectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionKind::MalformedInput => "malformed_input",
            RejectionKind::StructuralError => "structural_error",
            RejectionKind::FieldError => "field_error",
        }
    }
}

impl Rejection {
    /// 1-based index of the contact that caused the rejection.
    pub fn contact_index(&self) -> Option<usize> {
        match self {
            Rejection::Malformed { .. } | Rejection::NoContacts => None,
            Rejection::Structure { index, .. } | Rejection::Fields { index, .. } => Some(*index),
        }
    }

    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::Malformed { .. } => RejectionKind::MalformedInput,
            Rejection::NoContacts | Rejection::Structure { .. } => RejectionKind::StructuralError,
            Rejection::Fields { .. } => RejectionKind::FieldError,
        }
    }
}

/// Difference between a contact's child tags and the required set.
///
/// Tags are compared as a multiset: a required tag appearing twice is
/// reported as duplicated even when nothing is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureMismatch {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub duplicated: Vec<String>,
}

impl StructureMismatch {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.duplicated.is_empty()
    }
}

impl fmt::Display for StructureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("missing", &self.missing),
            ("extra", &self.extra),
            ("duplicated", &self.duplicated),
        ];
        let mut first = true;
        for (label, tags) in parts {
            if tags.is_empty() {
                continue;
            }
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", label, tags.join(", "))?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a complete contacts document held in memory.
pub fn validate_document(bytes: &[u8], validator: &ContactValidator) -> ValidationResult {
    match check_document(bytes, validator) {
        Ok(contacts) => {
            tracing::debug!(contacts = contacts.len(), "Contacts document accepted");
            ValidationResult::Valid(contacts)
        }
        Err(rejection) => {
            tracing::debug!(
                kind = rejection.kind().as_str(),
                contact_index = ?rejection.contact_index(),
                reason = %rejection,
                "Contacts document rejected"
            );
            ValidationResult::Invalid(rejection)
        }
    }
}

fn check_document(
    bytes: &[u8],
    validator: &ContactValidator,
) -> Result<Vec<ContactRecord>, Rejection> {
    let text = std::str::from_utf8(bytes).map_err(|e| Rejection::Malformed {
        detail: format!("invalid UTF-8: {}", e),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let document = Document::parse(text).map_err(|e| Rejection::Malformed {
        detail: e.to_string(),
    })?;

    // The root itself is not a candidate, only its descendants.
    let contact_nodes: Vec<Node> = document
        .root_element()
        .descendants()
        .skip(1)
        .filter(|node| node.is_element() && tag_name(node) == CONTACT_TAG)
        .collect();

    if contact_nodes.is_empty() {
        return Err(Rejection::NoContacts);
    }

    let mut contacts = Vec::with_capacity(contact_nodes.len());
    for (offset, node) in contact_nodes.iter().enumerate() {
        let index = offset + 1;

        let mismatch = structure_mismatch(node);
        if !mismatch.is_empty() {
            return Err(Rejection::Structure { index, mismatch });
        }

        let record = validator
            .validate(&raw_fields(node))
            .map_err(|errors| Rejection::Fields { index, errors })?;
        contacts.push(record);
    }

    Ok(contacts)
}

/// Tag name as written, with a `{namespace}` prefix for namespaced elements.
fn tag_name(node: &Node) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(namespace) => format!("{{{}}}{}", namespace, tag.name()),
        None => tag.name().to_string(),
    }
}

fn structure_mismatch(contact: &Node) -> StructureMismatch {
    let found: Vec<String> = contact
        .children()
        .filter(|child| child.is_element())
        .map(|child| tag_name(&child))
        .collect();

    let mut mismatch = StructureMismatch::default();
    for field in ContactField::ALL {
        match found.iter().filter(|tag| *tag == field.tag()).count() {
            0 => mismatch.missing.push(field.tag().to_string()),
            1 => {}
            _ => mismatch.duplicated.push(field.tag().to_string()),
        }
    }
    for tag in &found {
        if ContactField::from_tag(tag).is_none() && !mismatch.extra.contains(tag) {
            mismatch.extra.push(tag.clone());
        }
    }
    mismatch
}

/// Trimmed text of each field child; a child without text gives "".
fn raw_fields(contact: &Node) -> RawContact {
    contact
        .children()
        .filter(|child| child.is_element())
        .filter_map(|child| {
            let field = ContactField::from_tag(&tag_name(&child))?;
            Some((field, field_text(&child).trim().to_string()))
        })
        .collect()
}

/// All text directly inside a field element, joined.
///
/// Comments and processing instructions split a value into several text
/// nodes; CDATA content counts as text.
fn field_text(field: &Node) -> String {
    field
        .children()
        .filter(|node| node.is_text())
        .filter_map(|node| node.text())
        .collect()
}
