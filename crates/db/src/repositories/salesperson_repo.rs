//! Repository for the `salespersons` table (read-only roster).

use sqlx::PgPool;

use leadhub_core::types::DbId;

use crate::models::salesperson::Salesperson;

const SALESPERSON_COLUMNS: &str = "\
    id, company_id, full_name, email, is_active, created_at, updated_at";

/// Read access to the assignment roster.
pub struct SalespersonRepo;

impl SalespersonRepo {
    /// List a company's active salespersons, oldest first.
    ///
    /// The `(created_at, id)` ordering is what makes assignment
    /// tie-breaking deterministic; do not change it casually.
    pub async fn list_active(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Salesperson>, sqlx::Error> {
        let query = format!(
            "SELECT {SALESPERSON_COLUMNS} FROM salespersons \
             WHERE company_id = $1 AND is_active = TRUE \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Salesperson>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }
}
