use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiResponse;
use models::inquiry::{self, InquiryStatus};
use service::inquiries::{self, InquiryPage, InquiryView};
use service::pagination::Pagination;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::ok;
use crate::state::ServerState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InquiryListQuery {
    /// NEW | READ | RESPONDED | ARCHIVED
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(get, path = "/api/admin/inquiries", tag = "inquiries", params(InquiryListQuery), responses((status = 200, description = "Paginated inquiries"), (status = 400, description = "Unknown status")))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<InquiryListQuery>) -> ApiResult<InquiryPage> {
    let status = match q.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<InquiryStatus>().map_err(|e| JsonApiError::bad_request(e.to_string()))?),
        None => None,
    };
    let page = inquiries::list_inquiries(&state.db, status, Pagination::new(q.page, q.limit)).await?;
    Ok(ok(page))
}

#[utoipa::path(get, path = "/api/admin/inquiries/{id}", tag = "inquiries", params(("id" = Uuid, Path, description = "Inquiry id")), responses((status = 200, description = "Inquiry"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<InquiryView> {
    Ok(ok(inquiries::get_inquiry(&state.db, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: InquiryStatus,
}

#[utoipa::path(patch, path = "/api/admin/inquiries/{id}", tag = "inquiries", params(("id" = Uuid, Path, description = "Inquiry id")), request_body = crate::openapi::StatusRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Unknown status"), (status = 404, description = "Not Found")))]
pub async fn update_status(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<StatusInput>,
) -> ApiResult<inquiry::Model> {
    Ok(ok(inquiries::update_status(&state.db, id, input.status).await?))
}

#[utoipa::path(delete, path = "/api/admin/inquiries/{id}", tag = "inquiries", params(("id" = Uuid, Path, description = "Inquiry id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    inquiries::delete_inquiry(&state.db, id).await?;
    Ok(Json(ApiResponse::empty()))
}
