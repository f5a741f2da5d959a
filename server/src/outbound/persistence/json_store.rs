//! Flat-file JSON document store.
//!
//! The whole document lives in one pretty-printed JSON file. Loads read and
//! validate the full file; saves serialize the full document to a temporary
//! sibling and rename it over the target, so a crash mid-write never leaves
//! a half-written document behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::Document;
use crate::domain::ports::{DocumentStore, DocumentStoreError};

/// Document store persisting to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
}

impl JsonDocumentStore {
    /// Store backed by the given file path. The file need not exist yet;
    /// the first load bootstraps an empty document.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store reads and overwrites.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn load(&self) -> Result<Document, DocumentStoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no document yet, bootstrapping empty");
                return Ok(Document::default());
            }
            Err(err) => {
                return Err(DocumentStoreError::read(format!(
                    "{}: {err}",
                    self.path.display()
                )));
            }
        };

        let document: Document = serde_json::from_str(&raw).map_err(|err| {
            DocumentStoreError::read(format!("{}: {err}", self.path.display()))
        })?;
        document
            .validate()
            .map_err(|err| DocumentStoreError::read(format!("{}: {err}", self.path.display())))?;
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<(), DocumentStoreError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|err| DocumentStoreError::write(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|err| DocumentStoreError::write(err.to_string()))?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|err| DocumentStoreError::write(format!("{}: {err}", tmp.display())))?;
        fs::rename(&tmp, &self.path).await.map_err(|err| {
            DocumentStoreError::write(format!("{}: {err}", self.path.display()))
        })?;
        Ok(())
    }
}
