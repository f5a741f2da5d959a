//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`DocumentStore`, `AttachmentStore`) describe how the domain
//! reaches durable state; driving ports (`PortionQuery`, `PortionCommand`)
//! describe the use-cases inbound adapters may invoke. Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use super::{AttachmentKind, Bill, Document, Error, Portion};

/// Errors surfaced by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentStoreError {
    /// The persisted document exists but could not be read or fails schema
    /// validation.
    #[error("document read failed: {message}")]
    Read { message: String },
    /// The document could not be written durably.
    #[error("document write failed: {message}")]
    Write { message: String },
}

impl DocumentStoreError {
    /// Helper for read and validation failures.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Errors surfaced by attachment store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentStoreError {
    /// The file could not be written.
    #[error("attachment write failed: {message}")]
    Write { message: String },
    /// The file could not be read.
    #[error("attachment read failed: {message}")]
    Read { message: String },
    /// The requested file does not exist.
    #[error("attachment {filename} not found")]
    NotFound { filename: String },
}

impl AttachmentStoreError {
    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Helper for read failures.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Helper for missing files.
    pub fn not_found(filename: impl Into<String>) -> Self {
        Self::NotFound {
            filename: filename.into(),
        }
    }
}

/// Sole gateway to the persisted document. Every operation is a whole-file
/// read or a whole-file overwrite; there is no partial update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the full document, bootstrapping an empty one when no document
    /// has been persisted yet.
    async fn load(&self) -> Result<Document, DocumentStoreError>;

    /// Overwrite the persisted document in full. Must never leave a
    /// half-written document behind on failure.
    async fn save(&self, document: &Document) -> Result<(), DocumentStoreError>;
}

/// Flat-file storage for uploaded attachments, split by kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Write the file under its stored name, overwriting any previous file
    /// with that name.
    async fn save(
        &self,
        kind: AttachmentKind,
        stored_name: &str,
        bytes: &[u8],
    ) -> Result<(), AttachmentStoreError>;

    /// Read a stored file for serving.
    async fn read(
        &self,
        kind: AttachmentKind,
        stored_name: &str,
    ) -> Result<Vec<u8>, AttachmentStoreError>;

    /// Delete a stored file. Deleting a file that is already gone is Ok.
    async fn delete(
        &self,
        kind: AttachmentKind,
        stored_name: &str,
    ) -> Result<(), AttachmentStoreError>;
}

/// Fields accepted when creating a portion. `portion_no` arrives already
/// resolved: the inbound adapter applies the "freshly typed value wins"
/// rule before calling the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortion {
    pub floor: String,
    pub portion_no: String,
    pub portion_type: String,
    pub name: String,
    pub tenant_type: String,
    pub members: Vec<String>,
    pub contact_number: String,
    pub contact_number_2: String,
}

/// Fields accepted when updating a portion. `id`, `floor`, and `portion_no`
/// are immutable post-creation and deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortionUpdate {
    pub portion_type: String,
    pub name: String,
    pub tenant_type: String,
    pub members: Vec<String>,
    pub contact_number: String,
    pub contact_number_2: String,
}

/// Bill amounts already coerced to decimal by the inbound adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillAmounts {
    pub rent: Decimal,
    pub water: Decimal,
    pub electricity: Decimal,
    pub extra: Decimal,
}

/// Read-only portion use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortionQuery: Send + Sync {
    /// Every portion, in insertion order.
    async fn list(&self) -> Result<Vec<Portion>, Error>;

    /// A single portion by id.
    async fn get(&self, id: u64) -> Result<Portion, Error>;

    /// Portions on the given floor, exact match. An empty floor yields an
    /// empty result.
    async fn list_by_floor(&self, floor: &str) -> Result<Vec<Portion>, Error>;
}

/// Mutating portion use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortionCommand: Send + Sync {
    /// Validate, assign an id, append, persist.
    async fn create(&self, fields: NewPortion) -> Result<Portion, Error>;

    /// Update the mutable fields of an existing portion.
    async fn update(&self, id: u64, fields: PortionUpdate) -> Result<Portion, Error>;

    /// Remove the portion and delete its attachment files from disk.
    async fn delete(&self, id: u64) -> Result<(), Error>;

    /// Store an uploaded file and record it on the portion, returning the
    /// stored filename.
    async fn add_attachment(
        &self,
        id: u64,
        kind: AttachmentKind,
        original_filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Error>;

    /// Create or replace the bill for the given month.
    async fn upsert_bill(&self, id: u64, month: &str, amounts: BillAmounts) -> Result<Bill, Error>;

    /// Delete the bill for the given month.
    async fn delete_bill(&self, id: u64, month: &str) -> Result<(), Error>;
}

/// Fixture document store holding a document in memory. Useful in handler
/// tests where persistence is not under test.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    document: std::sync::Mutex<Document>,
}

impl InMemoryDocumentStore {
    /// Start from an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: std::sync::Mutex::new(document),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load(&self) -> Result<Document, DocumentStoreError> {
        let guard = self.document.lock().map_err(|_| {
            DocumentStoreError::read("in-memory document poisoned by a panicking test")
        })?;
        Ok(guard.clone())
    }

    async fn save(&self, document: &Document) -> Result<(), DocumentStoreError> {
        let mut guard = self.document.lock().map_err(|_| {
            DocumentStoreError::write("in-memory document poisoned by a panicking test")
        })?;
        *guard = document.clone();
        Ok(())
    }
}

/// Fixture attachment store that accepts every write and serves nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAttachmentStore;

#[async_trait]
impl AttachmentStore for FixtureAttachmentStore {
    async fn save(
        &self,
        _kind: AttachmentKind,
        _stored_name: &str,
        _bytes: &[u8],
    ) -> Result<(), AttachmentStoreError> {
        Ok(())
    }

    async fn read(
        &self,
        _kind: AttachmentKind,
        stored_name: &str,
    ) -> Result<Vec<u8>, AttachmentStoreError> {
        Err(AttachmentStoreError::not_found(stored_name))
    }

    async fn delete(
        &self,
        _kind: AttachmentKind,
        _stored_name: &str,
    ) -> Result<(), AttachmentStoreError> {
        Ok(())
    }
}
