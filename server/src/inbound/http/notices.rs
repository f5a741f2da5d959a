//! Billing notice handlers.
//!
//! ```text
//! GET /api/v1/portions/{id}/notice  Messaging link for one portion's bill
//! GET /api/v1/notices               Combined messaging link for every bill
//! ```
//!
//! The `period` query parameter defaults to the current month.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

use crate::domain::ApiResult;
use crate::domain::{BillNotice, current_period, normalize_month_key};
use crate::inbound::http::state::HttpState;

/// Optional billing period filter, e.g. `?period=march%202024`.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: String,
}

impl PeriodQuery {
    fn resolve(&self) -> String {
        if self.period.trim().is_empty() {
            current_period()
        } else {
            normalize_month_key(&self.period)
        }
    }
}

/// A prepared notice ready to open on the owner's phone.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NoticeResponse {
    /// Destination contact number.
    #[schema(example = "919999999999")]
    pub to: String,
    /// Plain-text bill summary.
    pub message: String,
    /// Pre-filled `wa.me` link carrying the message.
    #[schema(example = "https://wa.me/919999999999?text=...")]
    pub url: String,
}

impl From<BillNotice> for NoticeResponse {
    fn from(notice: BillNotice) -> Self {
        Self {
            to: notice.to,
            message: notice.message,
            url: notice.url.to_string(),
        }
    }
}

/// Messaging link for one portion's bill in the given period.
#[utoipa::path(
    get,
    path = "/api/v1/portions/{id}/notice",
    params(
        ("id" = u64, Path, description = "Portion id"),
        ("period" = Option<String>, Query, description = "Month label; defaults to the current month")
    ),
    responses(
        (status = 200, description = "The prepared notice", body = NoticeResponse),
        (status = 400, description = "Portion has no contact number", body = crate::domain::Error),
        (status = 404, description = "No such portion", body = crate::domain::Error)
    ),
    tags = ["notices"],
    operation_id = "getPortionNotice"
)]
#[get("/portions/{id}/notice")]
pub async fn get_portion_notice(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    query: web::Query<PeriodQuery>,
) -> ApiResult<HttpResponse> {
    let portion = state.portions_query.get(path.into_inner()).await?;
    let notice = crate::domain::portion_notice(&portion, &query.resolve())?;
    Ok(HttpResponse::Ok().json(NoticeResponse::from(notice)))
}

/// One combined notice covering every portion's bill for the period,
/// addressed to the first portion's primary contact.
#[utoipa::path(
    get,
    path = "/api/v1/notices",
    params(
        ("period" = Option<String>, Query, description = "Month label; defaults to the current month")
    ),
    responses(
        (status = 200, description = "The prepared notice", body = NoticeResponse),
        (status = 404, description = "No portions exist", body = crate::domain::Error)
    ),
    tags = ["notices"],
    operation_id = "getCombinedNotice"
)]
#[get("/notices")]
pub async fn get_combined_notice(
    state: web::Data<HttpState>,
    query: web::Query<PeriodQuery>,
) -> ApiResult<HttpResponse> {
    let portions = state.portions_query.list().await?;
    let notice = crate::domain::combined_notice(&portions, &query.resolve())?;
    Ok(HttpResponse::Ok().json(NoticeResponse::from(notice)))
}
