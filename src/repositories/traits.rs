use crate::error::StoreResult;
use async_trait::async_trait;

/// Store of named XML documents.
///
/// Provides abstraction over document storage, enabling different
/// implementations (filesystem, in-memory mock). Names are single plain
/// file names; implementations reject anything else with `InvalidName`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a new document. Either the whole document is stored or nothing is.
    async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Read a document's bytes.
    async fn read(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Names of all stored `.xml` documents, sorted.
    async fn list(&self) -> StoreResult<Vec<String>>;

    /// Delete a document.
    async fn delete(&self, name: &str) -> StoreResult<()>;

    /// Move a document to a new name. Fails with `AlreadyExists` rather than
    /// replacing an existing document, even under concurrent writers.
    async fn rename(&self, from: &str, to: &str) -> StoreResult<()>;
}
