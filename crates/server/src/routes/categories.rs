use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use common::types::ApiResponse;
use service::catalog::categories::{self, CategoryInput, CategoryWithCount};
use service::ordering::{Direction, EntityKind};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::{ok, track_reorder};
use crate::state::ServerState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;

/// Body of a reorder request: `{"direction": "up" | "down"}`.
#[derive(Debug, Deserialize)]
pub struct ReorderInput {
    pub direction: String,
}

#[utoipa::path(get, path = "/api/admin/categories", tag = "categories", responses((status = 200, description = "All categories"), (status = 401, description = "Unauthorized")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<CategoryWithCount>> {
    Ok(ok(categories::list_categories(&state.db).await?))
}

#[utoipa::path(post, path = "/api/admin/categories", tag = "categories", request_body = crate::openapi::CategoryRequest, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryWithCount>>), JsonApiError> {
    let created = categories::create_category(&state.db, input).await?;
    Ok((StatusCode::CREATED, ok(created)))
}

#[utoipa::path(get, path = "/api/admin/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "Category"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<CategoryWithCount> {
    Ok(ok(categories::get_category(&state.db, id).await?))
}

#[utoipa::path(put, path = "/api/admin/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), request_body = crate::openapi::CategoryRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<CategoryWithCount> {
    Ok(ok(categories::update_category(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "Deleted"), (status = 400, description = "Category still in use"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<()> {
    categories::delete_category(&state.db, id).await?;
    Ok(Json(ApiResponse::empty()))
}

#[utoipa::path(patch, path = "/api/admin/categories/{id}/order", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), request_body = crate::openapi::ReorderRequest, responses((status = 200, description = "Moved"), (status = 400, description = "Invalid direction or already at boundary"), (status = 404, description = "Not Found")))]
pub async fn reorder(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ReorderInput>,
) -> ApiResult<()> {
    let result = match input.direction.parse::<Direction>() {
        Ok(direction) => categories::move_category(&state.db, id, direction).await,
        Err(e) => Err(e.into()),
    };
    track_reorder(EntityKind::Category, &result);
    result?;
    Ok(Json(ApiResponse::empty()))
}
