//! Repository for the `companies` table.

use sqlx::PgPool;

use leadhub_core::types::DbId;

use crate::models::company::Company;

const COMPANY_COLUMNS: &str = "\
    id, company_name, page_id, page_access_token, created_at, updated_at";

/// Read access to companies: the ingestion core resolves tenants but
/// never creates or mutates them.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Find a company by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a company from its connected ad-platform page ID.
    pub async fn find_by_page_id(
        pool: &PgPool,
        page_id: &str,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE page_id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(page_id)
            .fetch_optional(pool)
            .await
    }
}
