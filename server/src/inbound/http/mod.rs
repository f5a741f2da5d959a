//! HTTP inbound adapter exposing REST endpoints.

pub mod attachments;
pub mod bills;
pub mod error;
pub mod health;
pub mod notices;
pub mod portions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Upload payload cap. Scanned id proofs and phone photos run well past the
/// framework default of 256 KiB.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Register the versioned API routes. `by-floor` is registered before the
/// `{id}` matcher so it is not swallowed by numeric path extraction.
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .service(portions::list_by_floor)
        .service(portions::list_portions)
        .service(portions::create_portion)
        .service(portions::get_portion)
        .service(portions::update_portion)
        .service(portions::delete_portion)
        .service(attachments::upload_id_proof)
        .service(attachments::upload_photo)
        .service(bills::upsert_bill)
        .service(bills::delete_bill)
        .service(notices::get_portion_notice)
        .service(notices::get_combined_notice);
}

/// Register the stored-file serving routes, mirroring the uploads layout
/// on disk.
pub fn uploads(cfg: &mut web::ServiceConfig) {
    cfg.service(attachments::serve_id_proof)
        .service(attachments::serve_photo);
}
