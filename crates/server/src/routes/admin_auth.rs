use axum::{extract::State, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use common::types::ApiResponse;
use service::auth::domain::{AdminUser, Claims, LoginInput};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::routes::ok;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct LoginOutput {
    pub user: AdminUser,
    pub token: String,
    pub expires_at: i64,
}

#[utoipa::path(post, path = "/api/admin/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<ApiResponse<LoginOutput>>), JsonApiError> {
    let session = state.auth_service().login(input).await?;

    let mut cookie = Cookie::new(state.auth.cookie_name.clone(), session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.auth.secure_cookie);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginOutput { user: session.user, token: session.token, expires_at: session.expires_at };
    Ok((jar, ok(out)))
}

#[utoipa::path(post, path = "/api/admin/logout", tag = "auth", responses((status = 200, description = "Logged Out")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    let jar = jar.remove(Cookie::build((state.auth.cookie_name.clone(), "")).path("/"));
    (jar, Json(ApiResponse::empty()))
}

#[utoipa::path(get, path = "/api/admin/me", tag = "auth", responses((status = 200, description = "Current admin"), (status = 401, description = "Unauthorized")))]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<ApiResponse<AdminUser>> {
    ok(AdminUser { id: claims.uid, username: claims.sub })
}
