//! Document persistence adapters.

pub mod json_store;

pub use self::json_store::JsonDocumentStore;
