//! I/O half of the lead assignment policy.
//!
//! Loads the roster and the active-lead counts, then delegates the
//! decision to [`leadhub_core::assignment::pick_assignee`].
//!
//! The roster read and the subsequent lead insert are NOT transactional:
//! two concurrent ingestion calls can observe the same salesperson as
//! least-loaded and both assign to them, transiently exceeding the soft
//! cap. This is an accepted, self-correcting race (the next assignment
//! re-reads fresh counts); only the `(company_id, phone)` uniqueness
//! constraint is strict, and the store enforces that one.

use leadhub_core::assignment::{pick_assignee, SalespersonLoad};
use leadhub_core::types::DbId;
use leadhub_db::repositories::{LeadRepo, SalespersonRepo};
use leadhub_db::DbPool;

use crate::state::AppState;

/// Pick the next assignee for a company, or `None` when the company has
/// no active salespersons.
pub async fn next_assignee(pool: &DbPool, company_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
    let roster = SalespersonRepo::list_active(pool, company_id).await?;
    if roster.is_empty() {
        return Ok(None);
    }

    let counts = LeadRepo::count_active_by_salesperson(pool, company_id).await?;
    let loads: Vec<SalespersonLoad> = roster
        .iter()
        .map(|sp| SalespersonLoad {
            id: sp.id,
            active_count: counts.get(&sp.id).copied().unwrap_or(0),
        })
        .collect();

    Ok(pick_assignee(&loads))
}

/// Assignment is best-effort in every ingestion channel: a failed roster
/// read downgrades to an unassigned lead instead of failing the call.
pub async fn best_effort_assignee(state: &AppState, company_id: DbId) -> Option<DbId> {
    match next_assignee(&state.pool, company_id).await {
        Ok(assignee) => assignee,
        Err(e) => {
            tracing::warn!(
                company_id,
                error = %e,
                "Assignment lookup failed; leaving lead unassigned"
            );
            None
        }
    }
}
