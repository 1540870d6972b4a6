use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiResponse;
use service::catalog::services::{self, CategoryServices, DeletedService, ServiceDetail, ServiceInput};
use service::ordering::{Direction, EntityKind};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::categories::ReorderInput;
use crate::routes::{ok, track_reorder};
use crate::state::ServerState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminServicesQuery {
    /// category slug
    pub category: Option<String>,
}

#[utoipa::path(get, path = "/api/admin/services", tag = "services", params(AdminServicesQuery), responses((status = 200, description = "All services"), (status = 401, description = "Unauthorized")))]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<AdminServicesQuery>,
) -> ApiResult<Vec<ServiceDetail>> {
    let category = q.category.as_deref().filter(|s| !s.is_empty());
    Ok(ok(services::list_services(&state.db, category).await?))
}

#[utoipa::path(get, path = "/api/admin/services/grouped", tag = "services", responses((status = 200, description = "Services grouped by category, with inquiry counts"), (status = 401, description = "Unauthorized")))]
pub async fn grouped(State(state): State<ServerState>) -> ApiResult<Vec<CategoryServices>> {
    Ok(ok(services::list_grouped(&state.db).await?))
}

#[utoipa::path(post, path = "/api/admin/services", tag = "services", request_body = crate::openapi::ServiceRequest, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ServiceInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDetail>>), JsonApiError> {
    let created = services::create_service(&state.db, input).await?;
    Ok((StatusCode::CREATED, ok(created)))
}

#[utoipa::path(get, path = "/api/admin/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Service with inquiry count"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<ServiceDetail> {
    Ok(ok(services::get_service(&state.db, id).await?))
}

#[utoipa::path(put, path = "/api/admin/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), request_body = crate::openapi::ServiceRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ServiceInput>,
) -> ApiResult<ServiceDetail> {
    Ok(ok(services::update_service(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Deleted; reports unlinked inquiries"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<DeletedService> {
    Ok(ok(services::delete_service(&state.db, id).await?))
}

#[utoipa::path(patch, path = "/api/admin/services/{id}/order", tag = "services", params(("id" = Uuid, Path, description = "Service id")), request_body = crate::openapi::ReorderRequest, responses((status = 200, description = "Moved"), (status = 400, description = "Invalid direction or already at boundary"), (status = 404, description = "Not Found")))]
pub async fn reorder(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ReorderInput>,
) -> ApiResult<()> {
    let result = match input.direction.parse::<Direction>() {
        Ok(direction) => services::move_service(&state.db, id, direction).await,
        Err(e) => Err(e.into()),
    };
    track_reorder(EntityKind::Service, &result);
    result?;
    Ok(Json(ApiResponse::empty()))
}
