mod fs_document_store;
mod traits;

pub use fs_document_store::FsDocumentStore;
pub use traits::DocumentStore;
