//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without real storage.

use std::sync::Arc;

use crate::domain::ports::{AttachmentStore, PortionCommand, PortionQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub portions: Arc<dyn PortionCommand>,
    pub portions_query: Arc<dyn PortionQuery>,
    pub attachments: Arc<dyn AttachmentStore>,
}

impl HttpState {
    /// Bundle port implementations for handler injection.
    pub fn new(
        portions: Arc<dyn PortionCommand>,
        portions_query: Arc<dyn PortionQuery>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            portions,
            portions_query,
            attachments,
        }
    }
}
