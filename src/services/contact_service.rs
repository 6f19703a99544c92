//! Contact service layer.
//!
//! The add, upload, list, download and validate flows. Every flow runs the
//! validation engine before anything reaches the store, so invalid documents
//! are never persisted.

use crate::domain::DocumentName;
use crate::error::{ServiceError, ServiceResult, StoreError, StoreResult};
use crate::models::{ContactRecord, RawContact};
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::DocumentStore;
use crate::validation::{
    validate_document, ContactValidator, FieldErrors, Rejection, ValidationResult,
};
use crate::xml::serialize_contact;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// A document that was written to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDocument {
    pub file_name: String,
    pub contacts: Vec<ContactRecord>,
    pub stored_at: DateTime<Utc>,
}

/// Result of the add-contact flow.
#[derive(Debug, Clone, PartialEq)]
pub enum AddContactOutcome {
    Saved(StoredDocument),
    Rejected(FieldErrors),
}

/// Result of the upload flow.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Accepted(StoredDocument),
    Rejected(Rejection),
}

/// One stored file as seen by the listing: its contacts, or why it is invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentListing {
    pub file_name: String,
    pub contacts: Vec<ContactRecord>,
    pub error: Option<String>,
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate one contact and store it as a new single-contact document.
    async fn add_contact(&self, raw: RawContact) -> ServiceResult<AddContactOutcome>;

    /// Validate an uploaded document and store it only if it is valid.
    async fn upload_document(&self, bytes: Vec<u8>) -> ServiceResult<UploadOutcome>;

    /// Re-validate and report every stored document, sorted by name.
    async fn list_documents(&self) -> ServiceResult<Vec<DocumentListing>>;

    /// Text of a stored `.xml` document, exactly as stored.
    ///
    /// A stored file that is not UTF-8 is reported as `NotUtf8`, never altered.
    async fn download_document(&self, file_name: &str) -> ServiceResult<String>;

    /// Validate a document without storing it.
    fn validate_document(&self, bytes: &[u8]) -> ValidationResult;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    store: Arc<dyn DocumentStore>,
    validator: ContactValidator,
    max_upload_bytes: usize,
    metrics: MetricsTracker,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        validator: ContactValidator,
        max_upload_bytes: usize,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            store,
            validator,
            max_upload_bytes,
            metrics,
        }
    }

    /// Count storage failures on their way out.
    fn tracked<T>(&self, operation: &str, result: StoreResult<T>) -> StoreResult<T> {
        if result.is_err() {
            self.metrics.track_storage_error(operation);
        }
        result
    }

    /// Stage the bytes and promote them to their final name.
    ///
    /// If promotion fails the staged entry is deleted before returning.
    async fn store_document(&self, name: &DocumentName, bytes: &[u8]) -> StoreResult<()> {
        let staged = name.staging_name();
        let written = self.store.write(&staged, bytes).await;
        self.tracked("write", written)?;

        let promoted = self.store.rename(&staged, name.as_str()).await;
        if let Err(e) = self.tracked("rename", promoted) {
            if let Err(cleanup) = self.store.delete(&staged).await {
                self.metrics.track_storage_error("delete");
                tracing::error!(
                    staged = %staged,
                    error = %cleanup,
                    "Failed to remove staged upload"
                );
            }
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn add_contact(&self, raw: RawContact) -> ServiceResult<AddContactOutcome> {
        let record = match self.validator.validate(&raw) {
            Ok(record) => record,
            Err(errors) => {
                tracing::info!(failed_fields = errors.len(), "Contact rejected");
                return Ok(AddContactOutcome::Rejected(errors));
            }
        };

        let name = DocumentName::generate();
        let bytes = serialize_contact(&record);
        let written = self.store.write(name.as_str(), &bytes).await;
        self.tracked("write", written)?;
        self.metrics.track_stored(1);

        tracing::info!(file_name = %name, "Contact saved");
        Ok(AddContactOutcome::Saved(StoredDocument {
            file_name: name.into_inner(),
            contacts: vec![record],
            stored_at: Utc::now(),
        }))
    }

    async fn upload_document(&self, bytes: Vec<u8>) -> ServiceResult<UploadOutcome> {
        if bytes.len() > self.max_upload_bytes {
            return Err(ServiceError::UploadTooLarge {
                size: bytes.len(),
                limit: self.max_upload_bytes,
            });
        }

        let timer = Timer::new("upload_document");
        let contacts = match self.validate_document(&bytes) {
            ValidationResult::Valid(contacts) => contacts,
            ValidationResult::Invalid(rejection) => {
                tracing::info!(reason = %rejection, "Upload rejected");
                timer.finish_with_status(false);
                return Ok(UploadOutcome::Rejected(rejection));
            }
        };

        let name = DocumentName::generate();
        if let Err(e) = self.store_document(&name, &bytes).await {
            timer.finish_with_status(false);
            return Err(e.into());
        }
        self.metrics.track_stored(contacts.len());
        timer.finish_with_status(true);

        tracing::info!(file_name = %name, contacts = contacts.len(), "Upload stored");
        Ok(UploadOutcome::Accepted(StoredDocument {
            file_name: name.into_inner(),
            contacts,
            stored_at: Utc::now(),
        }))
    }

    async fn list_documents(&self) -> ServiceResult<Vec<DocumentListing>> {
        let listed = self.store.list().await;
        let names = self.tracked("list", listed)?;

        let reads =
            futures::future::join_all(names.iter().map(|name| self.store.read(name))).await;

        let mut listings = Vec::with_capacity(names.len());
        for (file_name, read) in names.into_iter().zip(reads) {
            let bytes = match read {
                Ok(bytes) => bytes,
                Err(StoreError::NotFound(_)) => {
                    tracing::debug!(file_name = %file_name, "Document vanished while listing");
                    continue;
                }
                Err(e) => {
                    self.metrics.track_storage_error("read");
                    return Err(e.into());
                }
            };

            let listing = match self.validate_document(&bytes) {
                ValidationResult::Valid(contacts) => DocumentListing {
                    file_name,
                    contacts,
                    error: None,
                },
                ValidationResult::Invalid(rejection) => DocumentListing {
                    file_name,
                    contacts: Vec::new(),
                    error: Some(rejection.to_string()),
                },
            };
            listings.push(listing);
        }

        Ok(listings)
    }

    async fn download_document(&self, file_name: &str) -> ServiceResult<String> {
        let name = DocumentName::parse(file_name)
            .map_err(|_| StoreError::NotFound(file_name.to_string()))?;

        match self.store.read(name.as_str()).await {
            Ok(bytes) => String::from_utf8(bytes).map_err(|_| {
                tracing::warn!(file_name = %name, "Stored document is not UTF-8");
                ServiceError::NotUtf8 {
                    file_name: name.into_inner(),
                }
            }),
            Err(StoreError::NotFound(missing)) => Err(StoreError::NotFound(missing).into()),
            Err(e) => {
                self.metrics.track_storage_error("read");
                Err(e.into())
            }
        }
    }

    fn validate_document(&self, bytes: &[u8]) -> ValidationResult {
        let result = validate_document(bytes, &self.validator);
        match &result {
            ValidationResult::Valid(contacts) => self.metrics.track_accepted(contacts.len()),
            ValidationResult::Invalid(rejection) => self.metrics.track_rejection(rejection),
        }
        result
    }
}
