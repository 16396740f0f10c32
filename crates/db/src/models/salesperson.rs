use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `salespersons` table. Read-only to the ingestion core.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Salesperson {
    pub id: DbId,
    pub company_id: DbId,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
