use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use models::db::{connect_and_migrate, DatabaseConfig};
use server::state::{ServerAuthConfig, ServerState};

const SECRET: &str = "test-session-secret-0123456789abcdef";

async fn build_app() -> anyhow::Result<Router> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory()).await?;
    let state = ServerState {
        db,
        auth: ServerAuthConfig {
            jwt_secret: SECRET.into(),
            cookie_name: "hometown-session".into(),
            session_ttl_hours: 24,
            secure_cookie: false,
        },
        search: configs::SearchConfig::default(),
    };
    state.auth_service().set_password("admin", "changeme123").await?;
    Ok(server::app(state))
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Option<String>, Value)> {
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, cookie, body))
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    b.body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut b = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    b.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router) -> anyhow::Result<String> {
    let (status, _, body) = send(
        app,
        with_json("POST", "/api/admin/login", None, json!({"username": "admin", "password": "changeme123"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
}

async fn create_category(app: &Router, token: &str, name: &str) -> anyhow::Result<String> {
    let (status, _, body) = send(app, with_json("POST", "/api/admin/categories", Some(token), json!({"name": name}))).await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    Ok(body["data"]["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn admin_routes_require_session() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _, body) = send(&app, get("/api/admin/categories", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "error": "Unauthorized"}));

    let (status, _, _) = send(&app, get("/api/admin/me", Some("not-a-token"))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_sets_cookie_and_cookie_authenticates() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, cookie, body) = send(
        &app,
        with_json("POST", "/api/admin/login", None, json!({"username": "admin", "password": "changeme123"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "admin");
    let cookie = cookie.expect("session cookie");
    assert!(cookie.starts_with("hometown-session="));
    assert!(cookie.contains("HttpOnly"));

    let pair = cookie.split(';').next().unwrap().to_string();
    let req = Request::builder()
        .uri("/api/admin/me")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");

    let (status, _, body) = send(
        &app,
        with_json("POST", "/api/admin/login", None, json!({"username": "admin", "password": "wrong-password"})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
    Ok(())
}

#[tokio::test]
async fn category_reorder_and_delete_rules() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = login(&app).await?;

    let first = create_category(&app, &token, "Interior Finishing").await?;
    let second = create_category(&app, &token, "Outdoor & Specialty").await?;

    let (status, _, body) = send(
        &app,
        with_json("PATCH", &format!("/api/admin/categories/{first}/order"), Some(&token), json!({"direction": "up"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Category is already at the top");

    let (status, _, body) = send(
        &app,
        with_json("PATCH", &format!("/api/admin/categories/{first}/order"), Some(&token), json!({"direction": "sideways"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid direction");

    let (status, _, _) = send(
        &app,
        with_json("PATCH", &format!("/api/admin/categories/{second}/order"), Some(&token), json!({"direction": "up"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, get("/api/categories", None)).await?;
    let names: Vec<&str> = body["data"].as_array().unwrap().iter().filter_map(|c| c["name"].as_str()).collect();
    assert_eq!(names, vec!["Outdoor & Specialty", "Interior Finishing"]);

    let (status, _, _) = send(
        &app,
        with_json(
            "POST",
            "/api/admin/services",
            Some(&token),
            json!({"name": "Flooring", "description": "Hardwood, laminate and tile flooring installed.", "category_id": first}),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(&app, delete(&format!("/api/admin/categories/{first}"), &token)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Cannot delete category with 1 service(s)"));

    let (status, _, body) = send(&app, delete(&format!("/api/admin/categories/{second}"), &token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    Ok(())
}

#[tokio::test]
async fn public_inquiry_search_and_settings() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = login(&app).await?;
    let category = create_category(&app, &token, "Interior Finishing").await?;

    let (_, _, body) = send(
        &app,
        with_json(
            "POST",
            "/api/admin/services",
            Some(&token),
            json!({"name": "Cabinet Installation", "description": "Kitchen and bathroom cabinets fitted to measure.", "category_id": category}),
        ),
    )
    .await?;
    let service_id = body["data"]["id"].as_str().unwrap_or_default().to_string();
    assert_eq!(body["data"]["slug"], "cabinet-installation");

    let (status, _, body) = send(&app, get("/api/search?q=cabnet", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["slug"], "cabinet-installation");

    let (_, _, body) = send(&app, get("/api/search?q=c", None)).await?;
    assert_eq!(body["data"], json!([]));

    let long = format!("/api/search?q={}", "cabinet".repeat(600));
    let (status, _, body) = send(&app, get(&long, None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_array());

    let (status, _, body) = send(
        &app,
        with_json("POST", "/api/inquiries", None, json!({"name": "J", "email": "nope", "message": "short"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["errors"]["email"].is_array());

    let (status, _, body) = send(
        &app,
        with_json(
            "POST",
            "/api/inquiries",
            None,
            json!({"name": "Jordan", "email": "jordan@example.com", "service_id": service_id, "message": "Please quote new kitchen cabinets."}),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let inquiry_id = body["data"]["id"].as_str().unwrap_or_default().to_string();

    let (_, _, body) = send(&app, get("/api/admin/inquiries?status=NEW", Some(&token))).await?;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["inquiries"][0]["service"]["name"], "Cabinet Installation");

    let (status, _, _) = send(&app, get("/api/admin/inquiries?status=LOST", Some(&token))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(
        &app,
        with_json("PATCH", &format!("/api/admin/inquiries/{inquiry_id}"), Some(&token), json!({"status": "READ"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "READ");

    let (status, _, body) = send(&app, delete(&format!("/api/admin/services/{service_id}"), &token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["inquiry_count"], 1);

    let (status, _, body) = send(&app, get("/api/site-settings", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Site settings not found");

    let settings = json!({
        "service_area_lat": 40.7128,
        "service_area_lng": -74.006,
        "service_area_miles": 50,
        "company_name": "Hometown Services",
        "company_phone": "(555) 123-4567",
        "company_email": "info@hometownservices.net"
    });
    let (status, _, _) = send(&app, with_json("PUT", "/api/admin/settings", Some(&token), settings)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app, get("/api/site-settings", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["company_name"], "Hometown Services");
    assert!(body["data"].get("id").is_none());
    Ok(())
}

#[tokio::test]
async fn health_and_metrics_are_public() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, _, body) = send(&app, get("/health", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let res = app.clone().oneshot(get("/metrics", None)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
