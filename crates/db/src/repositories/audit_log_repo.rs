//! Repository for the `audit_logs` table (webhook ingestion trail).

use sqlx::PgPool;

use leadhub_core::types::DbId;

use crate::models::audit::AuditLog;

const AUDIT_COLUMNS: &str = "id, company_id, action, details, created_at";

/// Append-only audit sink for webhook processing outcomes.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Record one processed webhook item.
    pub async fn create(
        pool: &PgPool,
        company_id: Option<DbId>,
        action: &str,
        details: &serde_json::Value,
    ) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (company_id, action, details) \
             VALUES ($1, $2, $3) \
             RETURNING {AUDIT_COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(company_id)
            .bind(action)
            .bind(details)
            .fetch_one(pool)
            .await
    }

    /// List a company's audit records, newest first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
        limit: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_logs \
             WHERE company_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(company_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
