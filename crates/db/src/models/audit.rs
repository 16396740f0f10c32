use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `audit_logs` table: one processed webhook item,
/// success or failure.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub company_id: Option<DbId>,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}
