use async_trait::async_trait;
use contacts_xml::error::{StoreError, StoreResult};
use contacts_xml::repositories::DocumentStore;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::{Arc, Mutex};

/// Mock document store for testing.
///
/// Provides an in-memory implementation of DocumentStore that can be seeded
/// with documents, tracks method calls for verification, and can be told to
/// fail a given operation.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDocumentStore {
    documents: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockDocumentStore {
    /// Create a new empty MockDocumentStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document directly into the store, bypassing call tracking.
    pub fn insert(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        let mut documents = self.documents.lock().unwrap();
        documents.insert(name.to_string(), bytes.into());
    }

    /// Every stored name, including staged ones.
    pub fn names(&self) -> Vec<String> {
        let documents = self.documents.lock().unwrap();
        documents.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        let documents = self.documents.lock().unwrap();
        documents.get(name).cloned()
    }

    /// Make every call of `method` fail with an I/O error.
    pub fn fail_on(&self, method: &str) {
        let mut failing = self.failing.lock().unwrap();
        failing.push(method.to_string());
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        let counts = self.call_counts.lock().unwrap();
        counts.values().sum()
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        let failing = self.failing.lock().unwrap();
        if failing.iter().any(|m| m == method) {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("injected {} failure", method),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        self.track_call("write")?;

        let mut documents = self.documents.lock().unwrap();
        if documents.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        documents.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        self.track_call("read")?;

        let documents = self.documents.lock().unwrap();
        documents
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        self.track_call("list")?;

        let documents = self.documents.lock().unwrap();
        Ok(documents
            .keys()
            .filter(|name| name.ends_with(".xml"))
            .cloned()
            .collect())
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        self.track_call("delete")?;

        let mut documents = self.documents.lock().unwrap();
        documents
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn rename(&self, from: &str, to: &str) -> StoreResult<()> {
        self.track_call("rename")?;

        let mut documents = self.documents.lock().unwrap();
        if documents.contains_key(to) {
            return Err(StoreError::AlreadyExists(to.to_string()));
        }
        let bytes = documents
            .remove(from)
            .ok_or_else(|| StoreError::NotFound(from.to_string()))?;
        documents.insert(to.to_string(), bytes);
        Ok(())
    }
}
