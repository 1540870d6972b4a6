use axum::{extract::State, Json};

use common::types::ApiResponse;
use models::site_settings;
use service::settings::{self, SettingsInput};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::routes::ok;
use crate::state::ServerState;

#[utoipa::path(put, path = "/api/admin/settings", tag = "settings", request_body = crate::openapi::SettingsRequest, responses((status = 200, description = "Saved"), (status = 400, description = "Validation Error"), (status = 401, description = "Unauthorized")))]
pub async fn update(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<SettingsInput>,
) -> Result<Json<ApiResponse<site_settings::Model>>, JsonApiError> {
    Ok(ok(settings::upsert_settings(&state.db, input).await?))
}
