pub mod admin_auth;
pub mod categories;
pub mod inquiries;
pub mod public;
pub mod services;
pub mod settings;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::ApiResponse;
use service::errors::ServiceError;
use service::ordering::EntityKind;

use crate::{auth, metrics, openapi::ApiDoc, state::ServerState};

pub(crate) fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

pub(crate) fn track_reorder(kind: EntityKind, result: &Result<(), ServiceError>) {
    match result {
        Ok(()) => metrics::record_reorder(kind, Ok(())),
        Err(ServiceError::Ordering(e)) => metrics::record_reorder(kind, Err(e)),
        Err(_) => metrics::REORDER_TOTAL.with_label_values(&[kind.as_str(), "error"]).inc(),
    }
}

/// Build the full application router, including public, admin and ops routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(public::health))
        .route("/api/categories", get(public::list_categories))
        .route("/api/services", get(public::list_services))
        .route("/api/services/:slug", get(public::get_service))
        .route("/api/search-index", get(public::search_index))
        .route("/api/search", get(public::search))
        .route("/api/inquiries", post(public::create_inquiry))
        .route("/api/site-settings", get(public::site_settings))
        .route("/api/admin/login", post(admin_auth::login))
        .route("/api/admin/logout", post(admin_auth::logout));

    // Admin routes (session required)
    let admin = Router::new()
        .route("/api/admin/me", get(admin_auth::me))
        .route("/api/admin/categories", get(categories::list).post(categories::create))
        .route(
            "/api/admin/categories/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .route("/api/admin/categories/:id/order", patch(categories::reorder))
        .route("/api/admin/services", get(services::list).post(services::create))
        .route("/api/admin/services/grouped", get(services::grouped))
        .route(
            "/api/admin/services/:id",
            get(services::get).put(services::update).delete(services::delete),
        )
        .route("/api/admin/services/:id/order", patch(services::reorder))
        .route("/api/admin/inquiries", get(inquiries::list))
        .route(
            "/api/admin/inquiries/:id",
            get(inquiries::get).patch(inquiries::update_status).delete(inquiries::delete),
        )
        .route("/api/admin/settings", put(settings::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    // Ops routes
    let ops = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Compose
    public
        .merge(admin)
        .with_state(state)
        .merge(ops)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
