//! Filesystem-backed document store.
//!
//! All filesystem work runs on tokio's blocking pool via
//! `tokio::task::spawn_blocking` so the async runtime is never blocked.

use super::traits::DocumentStore;
use crate::domain::document_name::{is_plain_file_name, DOCUMENT_EXTENSION};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Documents stored as files in a single directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: Arc<PathBuf>,
}

impl FsDocumentStore {
    /// Open the store, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "Document store opened");
        Ok(Self {
            root: Arc::new(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(root: &Path, name: &str) -> StoreResult<PathBuf> {
        if !is_plain_file_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(root.join(name))
    }
}

/// Map "no such file" to `NotFound` for the given document name.
fn not_found_as(name: &str, e: io::Error) -> StoreError {
    if e.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(name.to_string())
    } else {
        StoreError::Io(e)
    }
}

async fn run_blocking<T, F>(task: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| StoreError::TaskJoin(format!("Task join error: {}", e)))?
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let root = self.root.clone();
        let path = Self::resolve(&root, name)?;
        let name = name.to_string();
        let bytes = bytes.to_vec();

        run_blocking(move || {
            // The temporary file is removed on drop if anything below fails.
            let mut tmp = NamedTempFile::new_in(root.as_path())?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist_noclobber(&path).map_err(|e| {
                if e.error.kind() == io::ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists(name.clone())
                } else {
                    StoreError::Io(e.error)
                }
            })?;
            tracing::debug!(name = %name, bytes = bytes.len(), "Document written");
            Ok(())
        })
        .await
    }

    async fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        let path = Self::resolve(&self.root, name)?;
        let name = name.to_string();

        run_blocking(move || fs::read(&path).map_err(|e| not_found_as(&name, e))).await
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let root = self.root.clone();

        run_blocking(move || {
            let mut names = Vec::new();
            for entry in fs::read_dir(root.as_path())? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                if name.ends_with(DOCUMENT_EXTENSION) && is_plain_file_name(&name) {
                    names.push(name);
                }
            }
            names.sort();
            Ok(names)
        })
        .await
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        let path = Self::resolve(&self.root, name)?;
        let name = name.to_string();

        run_blocking(move || {
            fs::remove_file(&path).map_err(|e| not_found_as(&name, e))?;
            tracing::debug!(name = %name, "Document deleted");
            Ok(())
        })
        .await
    }

    async fn rename(&self, from: &str, to: &str) -> StoreResult<()> {
        let from_path = Self::resolve(&self.root, from)?;
        let to_path = Self::resolve(&self.root, to)?;
        let from = from.to_string();
        let to = to.to_string();

        run_blocking(move || {
            // Linking fails if the target exists, unlike `fs::rename`.
            fs::hard_link(&from_path, &to_path).map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists(to.clone())
                } else {
                    not_found_as(&from, e)
                }
            })?;
            if let Err(e) = fs::remove_file(&from_path) {
                if let Err(undo) = fs::remove_file(&to_path) {
                    tracing::error!(to = %to, error = %undo, "Failed to undo document link");
                }
                return Err(StoreError::Io(e));
            }
            tracing::debug!(from = %from, to = %to, "Document renamed");
            Ok(())
        })
        .await
    }
}
