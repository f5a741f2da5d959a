//! Bill API handlers.
//!
//! ```text
//! PUT    /api/v1/portions/{id}/bills/{month}  Create or replace a month's bill
//! DELETE /api/v1/portions/{id}/bills/{month}  Delete a month's bill
//! ```
//!
//! Month labels are matched case-insensitively; "March 2024" and
//! "march 2024" address the same bill.

use actix_web::{HttpResponse, delete, put, web};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ApiResult;
use crate::domain::Bill;
use crate::domain::ports::BillAmounts;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_optional_amount, parse_required_amount};

/// Bill amounts as submitted by clients. Values may be JSON numbers or
/// numeric strings; `extra` defaults to zero when absent.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct BillForm {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "12000")]
    pub rent: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "350")]
    pub water: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "1240.50")]
    pub electricity: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "0")]
    pub extra: Option<Value>,
}

impl BillForm {
    fn into_amounts(self) -> Result<BillAmounts, crate::domain::Error> {
        Ok(BillAmounts {
            rent: parse_required_amount("rent", self.rent.as_ref())?,
            water: parse_required_amount("water", self.water.as_ref())?,
            electricity: parse_required_amount("electricity", self.electricity.as_ref())?,
            extra: parse_optional_amount("extra", self.extra.as_ref())?,
        })
    }
}

/// Create or replace the bill for one month. The stored total is the exact
/// decimal sum of the submitted amounts.
#[utoipa::path(
    put,
    path = "/api/v1/portions/{id}/bills/{month}",
    params(
        ("id" = u64, Path, description = "Portion id"),
        ("month" = String, Path, description = "Month label, e.g. \"march 2024\"")
    ),
    request_body = BillForm,
    responses(
        (status = 200, description = "The stored bill", body = Bill),
        (status = 400, description = "Invalid amount", body = crate::domain::Error),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["bills"],
    operation_id = "upsertBill"
)]
#[put("/portions/{id}/bills/{month}")]
pub async fn upsert_bill(
    state: web::Data<HttpState>,
    path: web::Path<(u64, String)>,
    form: web::Json<BillForm>,
) -> ApiResult<HttpResponse> {
    let (id, month) = path.into_inner();
    let amounts = form.into_inner().into_amounts()?;
    let bill = state.portions.upsert_bill(id, &month, amounts).await?;
    Ok(HttpResponse::Ok().json(bill))
}

/// Delete the bill for one month.
#[utoipa::path(
    delete,
    path = "/api/v1/portions/{id}/bills/{month}",
    params(
        ("id" = u64, Path, description = "Portion id"),
        ("month" = String, Path, description = "Month label, e.g. \"march 2024\"")
    ),
    responses(
        (status = 204, description = "Bill deleted"),
        (status = 404, description = "No such portion or bill", body = crate::domain::Error)
    ),
    tags = ["bills"],
    operation_id = "deleteBill"
)]
#[delete("/portions/{id}/bills/{month}")]
pub async fn delete_bill(
    state: web::Data<HttpState>,
    path: web::Path<(u64, String)>,
) -> ApiResult<HttpResponse> {
    let (id, month) = path.into_inner();
    state.portions.delete_bill(id, &month).await?;
    Ok(HttpResponse::NoContent().finish())
}
