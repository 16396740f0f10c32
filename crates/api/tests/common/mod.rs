//! Shared helpers for API integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` (via
//! [`build_app_router`]) so integration tests exercise the same
//! middleware stack that production uses.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use leadhub_adplatform::AdPlatformClient;
use leadhub_api::config::ServerConfig;
use leadhub_api::router::build_app_router;
use leadhub_api::state::AppState;

/// Verify token wired into the test config.
pub const TEST_VERIFY_TOKEN: &str = "test-verify-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// The Graph API base points at an unroutable local port so any leadgen
/// fetch fails fast instead of reaching the real platform.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        meta_verify_token: TEST_VERIFY_TOKEN.to_string(),
        graph_api_base: "http://127.0.0.1:1".to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let ad_client = Arc::new(AdPlatformClient::new(config.graph_api_base.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ad_client,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a raw body with an explicit content type (webhook and multipart
/// tests).
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_company(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO companies (company_name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_company_with_page(
    pool: &PgPool,
    name: &str,
    page_id: &str,
    page_access_token: Option<&str>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO companies (company_name, page_id, page_access_token) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(page_id)
    .bind(page_access_token)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_salesperson(pool: &PgPool, company_id: i64, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO salespersons (company_id, full_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(company_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Build a multipart body carrying a `companyId` field and one file.
pub fn multipart_import_body(company_id: i64, filename: &str, file_contents: &str) -> (String, String) {
    let boundary = "leadhub-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"companyId\"\r\n\r\n\
         {company_id}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {file_contents}\r\n\
         --{boundary}--\r\n"
    );
    (format!("multipart/form-data; boundary={boundary}"), body)
}
