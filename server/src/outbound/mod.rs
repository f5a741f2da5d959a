//! Outbound (driven) adapters: implementations of the domain's driven
//! ports against real storage.

pub mod attachments;
pub mod persistence;

pub use self::attachments::FsAttachmentStore;
pub use self::persistence::JsonDocumentStore;
