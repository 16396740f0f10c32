//! Integration tests for bulk lead import: per-row isolation and the
//! final summary report.

mod common;

use axum::http::StatusCode;
use common::{body_json, multipart_import_body, post_raw, seed_company};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_skips_rows_without_phone_and_continues(pool: PgPool) {
    let company = seed_company(&pool, "Acme Estates").await;
    let csv = "First Name,Phone No,Budget\n\
               Ravi,9000000001,50 lakh\n\
               Asha,,1 cr\n\
               Vikram,9000000003,\n";

    let (content_type, body) = multipart_import_body(company, "leads.csv", csv);
    let app = common::build_test_app(pool.clone());
    let response = post_raw(app, "/api/v1/leads/import", &content_type, body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let report = &json["data"];
    assert_eq!(report["created"], 2);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["errors"], 0);
    assert_eq!(report["total"], 3);

    let skipped = report["skippedRows"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["row"], 2);
    assert_eq!(skipped[0]["reason"], "Missing phone");
    assert_eq!(skipped[0]["data"]["First Name"], "Asha");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE company_id = $1")
        .bind(company)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_counts_duplicates_as_skipped_not_errors(pool: PgPool) {
    let company = seed_company(&pool, "Acme Estates").await;
    let csv = "First Name,Phone No\n\
               Ravi,9000000001\n\
               Ravi Again,9000000001\n";

    let (content_type, body) = multipart_import_body(company, "leads.csv", csv);
    let app = common::build_test_app(pool.clone());
    let response = post_raw(app, "/api/v1/leads/import", &content_type, body).await;

    let json = body_json(response).await;
    let report = &json["data"];
    assert_eq!(report["created"], 1);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["errors"], 0);

    let skipped = report["skippedRows"].as_array().unwrap();
    assert_eq!(skipped[0]["row"], 2);
    assert_eq!(skipped[0]["reason"], "Duplicate phone/email");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_maps_header_aliases(pool: PgPool) {
    let company = seed_company(&pool, "Acme Estates").await;
    // "mobile" for phone, "Customer First Name" for name.
    let csv = "Customer First Name,mobile,Source\n\
               Meera,9000000009,Facebook export\n";

    let (content_type, body) = multipart_import_body(company, "leads.csv", csv);
    let app = common::build_test_app(pool.clone());
    let response = post_raw(app, "/api/v1/leads/import", &content_type, body).await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 1);

    let (first_name, source): (String, String) = sqlx::query_as(
        "SELECT first_name, source FROM leads WHERE company_id = $1",
    )
    .bind(company)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(first_name, "Meera");
    assert_eq!(source, "facebook");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_rejects_unsupported_file_kind_before_any_row(pool: PgPool) {
    let company = seed_company(&pool, "Acme Estates").await;

    let (content_type, body) =
        multipart_import_body(company, "leads.pdf", "First Name,Phone No\nRavi,9000000001\n");
    let app = common::build_test_app(pool.clone());
    let response = post_raw(app, "/api/v1/leads/import", &content_type, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "rejected import must not write any rows");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_requires_an_existing_company(pool: PgPool) {
    let (content_type, body) =
        multipart_import_body(999_999, "leads.csv", "First Name,Phone No\nRavi,1\n");
    let app = common::build_test_app(pool.clone());
    let response = post_raw(app, "/api/v1/leads/import", &content_type, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_requires_a_file_field(pool: PgPool) {
    let company = seed_company(&pool, "Acme Estates").await;

    let boundary = "leadhub-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"companyId\"\r\n\r\n\
         {company}\r\n\
         --{boundary}--\r\n"
    );
    let app = common::build_test_app(pool.clone());
    let response = post_raw(
        app,
        "/api/v1/leads/import",
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
