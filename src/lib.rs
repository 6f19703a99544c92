//! Contacts XML - validate, normalize and store contact lists as XML files.
//!
//! A contact is a first name, last name, email and phone. Contacts are stored
//! as small XML documents (`<contacts><contact>...</contact></contacts>`).
//! Uploaded documents are accepted only if every contact in them is valid.
//!
//! # Architecture
//!
//! - **domain**: Field validators as value objects (names, email, phone, file names)
//! - **models**: The validated contact record and raw field input
//! - **validation**: Contact record and document structure validation
//! - **xml**: Canonical XML serialization
//! - **repositories**: Document store abstraction and filesystem implementation
//! - **services**: Add / upload / list / download flows
//! - **server**: MCP protocol server exposing the flows as tools
//! - **observability**: Metrics and timers
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;
pub mod validation;
pub mod xml;

// Re-export commonly used types
pub use config::Config;
pub use domain::{DocumentName, EmailAddress, NamePolicy, PersonName, PhoneNumber};
pub use error::{ConfigError, ServiceError, StoreError};
pub use models::{ContactField, ContactRecord, RawContact};
pub use observability::{MetricsTracker, Timer};
pub use repositories::{DocumentStore, FsDocumentStore};
pub use server::ContactsMcpServer;
pub use services::{
    AddContactOutcome, ContactService, ContactServiceImpl, DocumentListing, StoredDocument,
    UploadOutcome,
};
pub use validation::{
    validate_document, ContactValidator, FieldError, FieldErrors, Rejection, RejectionKind,
    StructureMismatch, ValidationResult,
};
pub use xml::{serialize_contact, serialize_contacts};
