//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. Swagger
//! UI serves it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{AttachmentKind, Bill, Error, ErrorCode, Portion};
use crate::inbound::http::attachments::UploadResponse;
use crate::inbound::http::bills::BillForm;
use crate::inbound::http::notices::NoticeResponse;
use crate::inbound::http::portions::PortionForm;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentledger API",
        description = "HTTP interface for rental portion records, bills, attachments, and billing notices."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::portions::list_portions,
        crate::inbound::http::portions::list_by_floor,
        crate::inbound::http::portions::create_portion,
        crate::inbound::http::portions::get_portion,
        crate::inbound::http::portions::update_portion,
        crate::inbound::http::portions::delete_portion,
        crate::inbound::http::attachments::upload_id_proof,
        crate::inbound::http::attachments::upload_photo,
        crate::inbound::http::attachments::serve_id_proof,
        crate::inbound::http::attachments::serve_photo,
        crate::inbound::http::bills::upsert_bill,
        crate::inbound::http::bills::delete_bill,
        crate::inbound::http::notices::get_portion_notice,
        crate::inbound::http::notices::get_combined_notice,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Portion,
        Bill,
        AttachmentKind,
        Error,
        ErrorCode,
        PortionForm,
        BillForm,
        UploadResponse,
        NoticeResponse,
    )),
    tags(
        (name = "portions", description = "Rental portion records"),
        (name = "bills", description = "Monthly bills per portion"),
        (name = "attachments", description = "Id proofs and photos"),
        (name = "notices", description = "Pre-filled billing messages"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
