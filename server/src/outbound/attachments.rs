//! Filesystem attachment store.
//!
//! Uploaded files land under the uploads root, one subdirectory per
//! attachment kind. Stored names are produced by the domain and are already
//! sanitized; the adapter still refuses anything that could escape its
//! directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::AttachmentKind;
use crate::domain::ports::{AttachmentStore, AttachmentStoreError};

/// Attachment store writing files under `<root>/id_proofs` and
/// `<root>/gallery`.
#[derive(Debug, Clone)]
pub struct FsAttachmentStore {
    id_proofs_dir: PathBuf,
    gallery_dir: PathBuf,
}

impl FsAttachmentStore {
    /// Store rooted at the given uploads directory, creating the per-kind
    /// subdirectories if they do not exist yet.
    pub fn new(root: &Path) -> std::io::Result<Self> {
        let id_proofs_dir = root.join("id_proofs");
        let gallery_dir = root.join("gallery");
        std::fs::create_dir_all(&id_proofs_dir)?;
        std::fs::create_dir_all(&gallery_dir)?;
        Ok(Self {
            id_proofs_dir,
            gallery_dir,
        })
    }

    fn dir(&self, kind: AttachmentKind) -> &Path {
        match kind {
            AttachmentKind::IdProof => &self.id_proofs_dir,
            AttachmentKind::Photo => &self.gallery_dir,
        }
    }

    fn resolve(&self, kind: AttachmentKind, stored_name: &str) -> Result<PathBuf, AttachmentStoreError> {
        if stored_name.is_empty()
            || stored_name.contains(['/', '\\'])
            || stored_name.contains("..")
        {
            return Err(AttachmentStoreError::write(format!(
                "refusing unsafe stored name {stored_name:?}"
            )));
        }
        Ok(self.dir(kind).join(stored_name))
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn save(
        &self,
        kind: AttachmentKind,
        stored_name: &str,
        bytes: &[u8],
    ) -> Result<(), AttachmentStoreError> {
        let path = self.resolve(kind, stored_name)?;
        fs::write(&path, bytes)
            .await
            .map_err(|err| AttachmentStoreError::write(format!("{}: {err}", path.display())))?;
        debug!(path = %path.display(), size = bytes.len(), "attachment stored");
        Ok(())
    }

    async fn read(
        &self,
        kind: AttachmentKind,
        stored_name: &str,
    ) -> Result<Vec<u8>, AttachmentStoreError> {
        let path = self
            .resolve(kind, stored_name)
            .map_err(|_| AttachmentStoreError::not_found(stored_name))?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AttachmentStoreError::not_found(stored_name))
            }
            Err(err) => Err(AttachmentStoreError::read(format!(
                "{}: {err}",
                path.display()
            ))),
        }
    }

    async fn delete(
        &self,
        kind: AttachmentKind,
        stored_name: &str,
    ) -> Result<(), AttachmentStoreError> {
        let path = self.resolve(kind, stored_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone is as good as deleted.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AttachmentStoreError::write(format!(
                "{}: {err}",
                path.display()
            ))),
        }
    }
}
