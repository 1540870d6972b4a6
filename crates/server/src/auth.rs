use axum::{extract::{Request, State}, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

use service::auth::service::verify_token;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Pull the session token from `Authorization: Bearer` or the session cookie.
fn session_token(req: &Request, cookie_name: &str) -> Result<Option<String>, JsonApiError> {
    if let Some(h) = req.headers().get(axum::http::header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let Some(token) = h.strip_prefix("Bearer ") else {
            tracing::warn!(path = %req.uri().path(), "invalid Authorization format (expect Bearer)");
            return Err(JsonApiError::unauthorized());
        };
        return Ok(Some(token.trim().to_string()));
    }
    let jar = CookieJar::from_headers(req.headers());
    Ok(jar.get(cookie_name).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

/// 管理端中间件：校验会话令牌，并把 claims 注入请求扩展
pub async fn require_admin(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = session_token(&req, &state.auth.cookie_name)? else {
        tracing::warn!(path = %path, "missing session token");
        return Err(JsonApiError::unauthorized());
    };

    match verify_token(&state.auth.jwt_secret, &token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized())
        }
    }
}
