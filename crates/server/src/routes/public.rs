use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use common::types::{ApiResponse, Health};
use models::site_settings;
use service::catalog::{categories, services};
use service::inquiries::{self, InquiryInput};
use service::search::{SearchOptions, SearchableService};
use service::settings;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::metrics;
use crate::routes::ok;
use crate::state::ServerState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/api/categories", tag = "public", responses((status = 200, description = "Categories with service counts")))]
pub async fn list_categories(State(state): State<ServerState>) -> ApiResult<Vec<categories::CategoryWithCount>> {
    Ok(ok(categories::list_categories(&state.db).await?))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServicesQuery {
    /// category slug
    pub category: Option<String>,
}

#[utoipa::path(get, path = "/api/services", tag = "public", params(ServicesQuery), responses((status = 200, description = "Services in display order")))]
pub async fn list_services(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ServicesQuery>,
) -> ApiResult<Vec<services::ServiceDetail>> {
    let category = q.category.as_deref().filter(|s| !s.is_empty());
    Ok(ok(services::list_services(&state.db, category).await?))
}

#[utoipa::path(get, path = "/api/services/{slug}", tag = "public", params(("slug" = String, Path, description = "Service slug")), responses((status = 200, description = "Service"), (status = 404, description = "Not Found")))]
pub async fn get_service(State(state): State<ServerState>, ApiPath(slug): ApiPath<String>) -> ApiResult<services::ServiceDetail> {
    Ok(ok(services::get_service_by_slug(&state.db, &slug).await?))
}

#[utoipa::path(get, path = "/api/search-index", tag = "public", responses((status = 200, description = "Searchable service records")))]
pub async fn search_index(State(state): State<ServerState>) -> ApiResult<Vec<SearchableService>> {
    Ok(ok(services::searchable_services(&state.db).await?))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[utoipa::path(get, path = "/api/search", tag = "public", params(SearchQuery), responses((status = 200, description = "Ranked matches")))]
pub async fn search(State(state): State<ServerState>, ApiQuery(q): ApiQuery<SearchQuery>) -> ApiResult<Vec<SearchableService>> {
    let limit = q.limit.unwrap_or(state.search.default_limit).clamp(1, 50);
    let opts = SearchOptions::from(&state.search);
    if q.q.trim().chars().count() < opts.min_query_len {
        return Ok(ok(Vec::new()));
    }
    let index = services::build_search_index(&state.db, opts).await?;
    let text = q.q;
    let query_len = text.chars().count();
    // 编辑距离扫描是 CPU 密集型，放到阻塞线程池
    let results = tokio::task::spawn_blocking(move || index.query(&text, limit))
        .await
        .map_err(|e| JsonApiError::internal(format!("search task failed: {e}")))?;
    metrics::SEARCH_QUERIES_TOTAL.inc();
    info!(event = "search_served", query_len, hits = results.len());
    Ok(ok(results))
}

#[derive(Debug, Serialize)]
pub struct CreatedInquiry {
    pub id: Uuid,
}

#[utoipa::path(post, path = "/api/inquiries", tag = "public", request_body = crate::openapi::InquiryRequest, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error")))]
pub async fn create_inquiry(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<InquiryInput>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedInquiry>>), JsonApiError> {
    let created = inquiries::create_inquiry(&state.db, input).await?;
    metrics::INQUIRIES_CREATED_TOTAL.inc();
    Ok((StatusCode::CREATED, ok(CreatedInquiry { id: created.id })))
}

/// Settings fields safe for public pages.
#[derive(Debug, Serialize)]
pub struct PublicSettings {
    pub service_area_lat: f64,
    pub service_area_lng: f64,
    pub service_area_miles: i32,
    pub company_name: String,
    pub company_phone: String,
    pub company_email: String,
    pub company_address: Option<String>,
}

impl From<site_settings::Model> for PublicSettings {
    fn from(m: site_settings::Model) -> Self {
        Self {
            service_area_lat: m.service_area_lat,
            service_area_lng: m.service_area_lng,
            service_area_miles: m.service_area_miles,
            company_name: m.company_name,
            company_phone: m.company_phone,
            company_email: m.company_email,
            company_address: m.company_address,
        }
    }
}

#[utoipa::path(get, path = "/api/site-settings", tag = "public", responses((status = 200, description = "Public settings"), (status = 404, description = "Not configured")))]
pub async fn site_settings(State(state): State<ServerState>) -> ApiResult<PublicSettings> {
    let found = settings::get_settings(&state.db)
        .await?
        .ok_or_else(|| JsonApiError::not_found("Site settings not found"))?;
    Ok(ok(found.into()))
}
