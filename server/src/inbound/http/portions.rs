//! Portion API handlers.
//!
//! ```text
//! GET    /api/v1/portions           List every portion
//! GET    /api/v1/portions/by-floor  List portions on one floor
//! POST   /api/v1/portions           Create a portion
//! GET    /api/v1/portions/{id}      Fetch one portion
//! PUT    /api/v1/portions/{id}      Update a portion's mutable fields
//! DELETE /api/v1/portions/{id}      Delete a portion and its files
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::ApiResult;
use crate::domain::ports::{NewPortion, PortionUpdate};
use crate::domain::{Portion, parse_members};
use crate::inbound::http::state::HttpState;

/// Portion fields as submitted by clients.
///
/// Every field defaults to empty so missing-field validation happens in the
/// domain with a consistent error shape instead of a serde rejection.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct PortionForm {
    #[serde(default)]
    pub floor: String,
    /// Unit label chosen from the existing labels on the floor.
    #[serde(default)]
    pub portion_no: String,
    /// Freshly typed unit label; wins over `portion_no` when non-empty.
    #[serde(default)]
    pub new_portion_no: String,
    #[serde(rename = "type", default)]
    pub portion_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tenant_type: String,
    /// Comma-separated member names.
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub contact_number_2: String,
}

impl PortionForm {
    fn resolved_portion_no(&self) -> String {
        if self.new_portion_no.trim().is_empty() {
            self.portion_no.clone()
        } else {
            self.new_portion_no.clone()
        }
    }

    fn into_new_portion(self) -> NewPortion {
        let portion_no = self.resolved_portion_no();
        NewPortion {
            floor: self.floor,
            portion_no,
            portion_type: self.portion_type,
            name: self.name,
            tenant_type: self.tenant_type,
            members: parse_members(&self.members),
            contact_number: self.contact_number,
            contact_number_2: self.contact_number_2,
        }
    }

    fn into_update(self) -> PortionUpdate {
        PortionUpdate {
            portion_type: self.portion_type,
            name: self.name,
            tenant_type: self.tenant_type,
            members: parse_members(&self.members),
            contact_number: self.contact_number,
            contact_number_2: self.contact_number_2,
        }
    }
}

/// Floor filter for the by-floor listing.
#[derive(Debug, Clone, Deserialize)]
pub struct FloorQuery {
    #[serde(default)]
    pub floor: String,
}

/// List every portion.
#[utoipa::path(
    get,
    path = "/api/v1/portions",
    responses(
        (status = 200, description = "All portions", body = [Portion])
    ),
    tags = ["portions"],
    operation_id = "listPortions"
)]
#[get("/portions")]
pub async fn list_portions(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let portions = state.portions_query.list().await?;
    Ok(HttpResponse::Ok().json(portions))
}

/// List portions on one floor. An empty or absent floor yields an empty
/// list rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/portions/by-floor",
    params(
        ("floor" = Option<String>, Query, description = "Exact floor label to match")
    ),
    responses(
        (status = 200, description = "Portions on the floor", body = [Portion])
    ),
    tags = ["portions"],
    operation_id = "listPortionsByFloor"
)]
#[get("/portions/by-floor")]
pub async fn list_by_floor(
    state: web::Data<HttpState>,
    query: web::Query<FloorQuery>,
) -> ApiResult<HttpResponse> {
    let portions = state.portions_query.list_by_floor(&query.floor).await?;
    Ok(HttpResponse::Ok().json(portions))
}

/// Create a portion.
///
/// # Errors
///
/// - `400 Bad Request`: a required field is blank.
#[utoipa::path(
    post,
    path = "/api/v1/portions",
    request_body = PortionForm,
    responses(
        (status = 201, description = "Portion created", body = Portion),
        (status = 400, description = "Invalid request", body = crate::domain::Error)
    ),
    tags = ["portions"],
    operation_id = "createPortion"
)]
#[post("/portions")]
pub async fn create_portion(
    state: web::Data<HttpState>,
    form: web::Json<PortionForm>,
) -> ApiResult<HttpResponse> {
    let created = state
        .portions
        .create(form.into_inner().into_new_portion())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Fetch one portion by id.
#[utoipa::path(
    get,
    path = "/api/v1/portions/{id}",
    params(
        ("id" = u64, Path, description = "Portion id")
    ),
    responses(
        (status = 200, description = "The portion", body = Portion),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["portions"],
    operation_id = "getPortion"
)]
#[get("/portions/{id}")]
pub async fn get_portion(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let portion = state.portions_query.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(portion))
}

/// Update a portion's mutable fields. `floor` and `portion_no` are fixed at
/// creation; values submitted for them are ignored.
#[utoipa::path(
    put,
    path = "/api/v1/portions/{id}",
    params(
        ("id" = u64, Path, description = "Portion id")
    ),
    request_body = PortionForm,
    responses(
        (status = 200, description = "Updated portion", body = Portion),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["portions"],
    operation_id = "updatePortion"
)]
#[put("/portions/{id}")]
pub async fn update_portion(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    form: web::Json<PortionForm>,
) -> ApiResult<HttpResponse> {
    let updated = state
        .portions
        .update(path.into_inner(), form.into_inner().into_update())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a portion along with its stored attachment files.
#[utoipa::path(
    delete,
    path = "/api/v1/portions/{id}",
    params(
        ("id" = u64, Path, description = "Portion id")
    ),
    responses(
        (status = 204, description = "Portion deleted"),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["portions"],
    operation_id = "deletePortion"
)]
#[delete("/portions/{id}")]
pub async fn delete_portion(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    state.portions.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
