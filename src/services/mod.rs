//! Application service layer.
//!
//! Services contain the contact flows and orchestrate the validation engine
//! and the document store. They provide a clean boundary between the MCP
//! handlers and the data access layer.

mod contact_service;

pub use contact_service::{
    AddContactOutcome, ContactService, ContactServiceImpl, DocumentListing, StoredDocument,
    UploadOutcome,
};
