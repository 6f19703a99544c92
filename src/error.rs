//! Error types for the contacts XML server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Validation rejections are not errors; see [`crate::validation::ValidationResult`].

use thiserror::Error;

/// Errors that can occur when reading or writing stored documents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with this name
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Name is not a single plain file name
    #[error("Invalid document name: {0}")]
    InvalidName(String),

    /// Refusing to overwrite an existing document
    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    /// Underlying filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking storage task panicked or was cancelled
    #[error("Storage task failed: {0}")]
    TaskJoin(String),
}

/// Errors returned by the contact service flows.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Upload exceeds the configured size ceiling
    #[error("Upload too large: {size} bytes (limit {limit})")]
    UploadTooLarge { size: usize, limit: usize },

    /// Stored document is not UTF-8 text
    #[error("Document is not valid UTF-8: {file_name}")]
    NotUtf8 { file_name: String },
}

impl ServiceError {
    /// Whether the error means "no such document" to the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::Store(StoreError::NotFound(_) | StoreError::InvalidName(_))
        )
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
