//! Attachment upload and serving handlers.
//!
//! ```text
//! POST /api/v1/portions/{id}/id-proofs/{filename}  Upload an id proof
//! POST /api/v1/portions/{id}/photos/{filename}     Upload a photo
//! GET  /uploads/id_proofs/{filename}               Serve a stored id proof
//! GET  /uploads/gallery/{filename}                 Serve a stored photo
//! ```
//!
//! Uploads are raw request bodies with the original filename in the path;
//! the extension check and name mangling happen in the domain. Serving
//! routes mirror the on-disk layout under the uploads root.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::domain::ApiResult;
use crate::domain::{AttachmentKind, Error};
use crate::inbound::http::state::HttpState;

/// Upload response carrying the stored filename.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Name the file was stored under; use it with the serving routes.
    #[schema(example = "1_20240301_120000_card.pdf")]
    pub filename: String,
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

async fn upload(
    state: &HttpState,
    kind: AttachmentKind,
    id: u64,
    filename: &str,
    bytes: web::Bytes,
) -> ApiResult<HttpResponse> {
    let stored = state
        .portions
        .add_attachment(id, kind, filename, bytes.to_vec())
        .await?;
    Ok(HttpResponse::Created().json(UploadResponse { filename: stored }))
}

async fn serve(state: &HttpState, kind: AttachmentKind, filename: &str) -> ApiResult<HttpResponse> {
    let bytes = state
        .attachments
        .read(kind, filename)
        .await
        .map_err(|err| match err {
            crate::domain::ports::AttachmentStoreError::NotFound { filename } => {
                Error::not_found(format!("no stored file named {filename}"))
            }
            other => Error::storage(other.to_string()),
        })?;
    Ok(HttpResponse::Ok()
        .content_type(content_type_for(filename))
        .body(bytes))
}

/// Upload an id proof for a portion.
///
/// # Errors
///
/// - `400 Bad Request`: the filename's extension is not an allowed type.
/// - `404 Not Found`: no such portion.
#[utoipa::path(
    post,
    path = "/api/v1/portions/{id}/id-proofs/{filename}",
    params(
        ("id" = u64, Path, description = "Portion id"),
        ("filename" = String, Path, description = "Original filename, extension included")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "File type not allowed", body = crate::domain::Error),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["attachments"],
    operation_id = "uploadIdProof"
)]
#[post("/portions/{id}/id-proofs/{filename}")]
pub async fn upload_id_proof(
    state: web::Data<HttpState>,
    path: web::Path<(u64, String)>,
    bytes: web::Bytes,
) -> ApiResult<HttpResponse> {
    let (id, filename) = path.into_inner();
    upload(&state, AttachmentKind::IdProof, id, &filename, bytes).await
}

/// Upload a photo for a portion.
#[utoipa::path(
    post,
    path = "/api/v1/portions/{id}/photos/{filename}",
    params(
        ("id" = u64, Path, description = "Portion id"),
        ("filename" = String, Path, description = "Original filename, extension included")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "File type not allowed", body = crate::domain::Error),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["attachments"],
    operation_id = "uploadPhoto"
)]
#[post("/portions/{id}/photos/{filename}")]
pub async fn upload_photo(
    state: web::Data<HttpState>,
    path: web::Path<(u64, String)>,
    bytes: web::Bytes,
) -> ApiResult<HttpResponse> {
    let (id, filename) = path.into_inner();
    upload(&state, AttachmentKind::Photo, id, &filename, bytes).await
}

/// Serve a stored id proof.
#[utoipa::path(
    get,
    path = "/uploads/id_proofs/{filename}",
    params(
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "No such file", body = crate::domain::Error)
    ),
    tags = ["attachments"],
    operation_id = "serveIdProof"
)]
#[get("/id_proofs/{filename}")]
pub async fn serve_id_proof(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    serve(&state, AttachmentKind::IdProof, &path.into_inner()).await
}

/// Serve a stored photo.
#[utoipa::path(
    get,
    path = "/uploads/gallery/{filename}",
    params(
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "No such file", body = crate::domain::Error)
    ),
    tags = ["attachments"],
    operation_id = "servePhoto"
)]
#[get("/gallery/{filename}")]
pub async fn serve_photo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    serve(&state, AttachmentKind::Photo, &path.into_inner()).await
}
