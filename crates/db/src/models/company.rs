use leadhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `companies` table.
///
/// `page_access_token` is the company's own ad-platform credential. It is
/// never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    pub company_name: String,
    pub page_id: Option<String>,
    #[serde(skip_serializing)]
    pub page_access_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
