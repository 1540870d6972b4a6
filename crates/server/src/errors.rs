use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::types::{ApiResponse, FieldErrors};
use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::ordering::OrderingError;

/// Error response rendered in the standard `{success: false, error, errors?}` envelope.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub errors: Option<FieldErrors>,
    /// Internal cause, logged for 5xx and never sent to clients.
    pub cause: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, cause: Option<String>) -> Self {
        Self { status, error: error.into(), errors: None, cause }
    }

    pub fn bad_request(error: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, error, None) }

    pub fn unauthorized() -> Self { Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", None) }

    pub fn not_found(error: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, error, None) }

    pub fn internal(cause: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", Some(cause.into()))
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self { status: StatusCode::BAD_REQUEST, error: "Validation failed".into(), errors: Some(errors), cause: None }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, cause = self.cause.as_deref().unwrap_or("-"), "request failed");
        }
        let body = match self.errors {
            Some(errors) => ApiResponse::<()>::invalid(errors),
            None => ApiResponse::<()>::err(self.error),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<OrderingError> for JsonApiError {
    fn from(e: OrderingError) -> Self {
        match e {
            OrderingError::NotFound(_) => JsonApiError::not_found(e.to_string()),
            OrderingError::InvalidDirection(_) | OrderingError::AlreadyAtBoundary { .. } => JsonApiError::bad_request(e.to_string()),
            OrderingError::Repository(_) | OrderingError::Transaction(_) => JsonApiError::internal(e.to_string()),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => JsonApiError::bad_request(msg),
            AuthError::Unauthorized | AuthError::NotFound => {
                JsonApiError::new(StatusCode::UNAUTHORIZED, "Invalid username or password", None)
            }
            AuthError::TokenError(_) => JsonApiError::unauthorized(),
            AuthError::HashError(_) | AuthError::Repository(_) => JsonApiError::internal(e.to_string()),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::Conflict(msg) => JsonApiError::bad_request(msg),
            ServiceError::InvalidFields(errors) => JsonApiError::invalid(errors),
            ServiceError::NotFound(msg) => JsonApiError::not_found(msg),
            ServiceError::Model(ModelError::Validation(msg)) => JsonApiError::bad_request(msg),
            ServiceError::Model(ModelError::Db(cause)) | ServiceError::Db(cause) => JsonApiError::internal(cause),
            ServiceError::Ordering(e) => e.into(),
            ServiceError::Auth(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e.body_text(), "rejected json body");
        JsonApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self { JsonApiError::bad_request(format!("Invalid query: {}", e.body_text())) }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self { JsonApiError::bad_request(format!("Invalid path: {}", e.body_text())) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::ordering::{Direction, EntityKind};

    #[test]
    fn ordering_errors_map_to_client_statuses() {
        let e: JsonApiError = OrderingError::AlreadyAtBoundary { kind: EntityKind::Service, direction: Direction::Up }.into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.error, "Service is already at the top");

        let e: JsonApiError = OrderingError::NotFound(EntityKind::Category).into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.error, "Category not found");

        let e: JsonApiError = OrderingError::Transaction("boom".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.error, "Internal server error");
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let e: JsonApiError = ServiceError::Conflict("blocked".into()).into();
        assert_eq!((e.status, e.error.as_str()), (StatusCode::BAD_REQUEST, "blocked"));
        let e: JsonApiError = ServiceError::Db("connection reset".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.cause.as_deref(), Some("connection reset"));
        let e: JsonApiError = ServiceError::Auth(AuthError::Unauthorized).into();
        assert_eq!(e.status, StatusCode::UNAUTHORIZED);
    }
}
