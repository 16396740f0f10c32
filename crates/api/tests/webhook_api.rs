//! Integration tests for the two ad-platform webhook channels.
//!
//! The Meta delivery endpoint must acknowledge 200 no matter what
//! happens internally; these tests drive every failure path (unknown
//! page, missing credential, unreachable Graph API, malformed body) and
//! assert both the acknowledgement and the audit trail.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, get, post_json, post_raw, seed_company_with_page, seed_salesperson,
    TEST_VERIFY_TOKEN,
};
use serde_json::json;
use sqlx::PgPool;

async fn lead_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM leads")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn audit_actions(pool: &PgPool, company_id: i64) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT action FROM audit_logs WHERE company_id = $1 ORDER BY id ASC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Meta verification handshake
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_verify_echoes_challenge_for_correct_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let uri = format!(
        "/api/v1/webhooks/meta?hub.mode=subscribe&hub.verify_token={TEST_VERIFY_TOKEN}&hub.challenge=challenge-1234"
    );
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "challenge-1234");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_verify_rejects_wrong_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let uri =
        "/api/v1/webhooks/meta?hub.mode=subscribe&hub.verify_token=wrong&hub.challenge=challenge-1234";
    let response = get(app, uri).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_verify_rejects_missing_mode(pool: PgPool) {
    let app = common::build_test_app(pool);
    let uri = format!(
        "/api/v1/webhooks/meta?hub.verify_token={TEST_VERIFY_TOKEN}&hub.challenge=challenge-1234"
    );
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Meta delivery: always acknowledges, failures stay internal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_delivery_acks_unknown_page_without_side_effects(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/meta",
        json!({
            "object": "page",
            "entry": [
                { "id": "unmapped-page", "changes": [ { "value": { "leadgen_id": "L1" } } ] }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lead_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_delivery_audits_missing_credential_and_still_acks(pool: PgPool) {
    // Per-company credential only: a company without its own token fails
    // the entry, never falls back to a shared secret.
    let company = seed_company_with_page(&pool, "Acme Estates", "page-1", None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/meta",
        json!({
            "entry": [
                { "id": "page-1", "changes": [ { "value": { "leadgen_id": "L1" } } ] }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lead_count(&pool).await, 0);
    assert_eq!(audit_actions(&pool, company).await, vec!["webhook:error"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_delivery_audits_fetch_failure_and_still_acks(pool: PgPool) {
    // The test config's Graph API base is unroutable, so the fetch fails
    // fast; the failure must be audited and the ack unaffected.
    let company =
        seed_company_with_page(&pool, "Acme Estates", "page-1", Some("token-1")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/meta",
        json!({
            "entry": [
                { "id": "page-1", "changes": [ { "value": { "leadgen_id": "L1" } } ] }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lead_count(&pool).await, 0);
    assert_eq!(audit_actions(&pool, company).await, vec!["webhook:error"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_delivery_mixed_entries_processes_known_company(pool: PgPool) {
    // One unmapped entry, one entry whose fetch fails: the unmapped one
    // produces no audit record (it never reaches per-change processing),
    // the mapped one produces exactly one failure record.
    let company =
        seed_company_with_page(&pool, "Acme Estates", "page-1", Some("token-1")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/meta",
        json!({
            "entry": [
                { "id": "unmapped-page", "changes": [ { "value": { "leadgen_id": "L0" } } ] },
                { "id": "page-1", "changes": [ { "value": { "leadgen_id": "L1" } } ] }
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let total_audits: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total_audits, 1);
    assert_eq!(audit_actions(&pool, company).await, vec!["webhook:error"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_delivery_acks_malformed_payload(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_raw(
        app,
        "/api/v1/webhooks/meta",
        "application/json",
        "this is not json",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lead_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meta_delivery_acks_empty_payload(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/webhooks/meta", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Google delivery
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn google_delivery_creates_an_assigned_lead(pool: PgPool) {
    let company = seed_company_with_page(&pool, "Acme Estates", "gpage-1", None).await;
    let sp = seed_salesperson(&pool, company, "Meera").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/google?pageId=gpage-1",
        json!({
            "first_name": "Asha",
            "last_name": "Patel",
            "phone": "9000000001",
            "email": "Asha@Example.com",
            "campaignName": "spring-campaign",
            "submissionId": "sub-42",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let (source, external_ref, assigned_to, campaign): (String, String, i64, String) =
        sqlx::query_as(
            "SELECT source, external_ref, assigned_to, campaign FROM leads \
             WHERE company_id = $1",
        )
        .bind(company)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(source, "google");
    assert_eq!(external_ref, "sub-42");
    assert_eq!(assigned_to, sp);
    assert_eq!(campaign, "spring-campaign");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn google_delivery_surfaces_unknown_page_as_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/google?pageId=nobody",
        json!({ "first_name": "Asha", "phone": "9000000001" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(lead_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn google_delivery_requires_page_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/webhooks/google",
        json!({ "first_name": "Asha", "phone": "9000000001" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn google_delivery_surfaces_duplicates_as_409(pool: PgPool) {
    seed_company_with_page(&pool, "Acme Estates", "gpage-1", None).await;

    let body = json!({ "first_name": "Asha", "phone": "9000000001" });

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/webhooks/google?pageId=gpage-1",
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/webhooks/google?pageId=gpage-1",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}
