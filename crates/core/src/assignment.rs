//! Selection half of the lead assignment policy.
//!
//! The I/O half (loading the roster and the per-salesperson active-lead
//! counts) lives in the api crate; this module only decides. The policy
//! is greedy least-loaded with a soft capacity preference: salespersons
//! under [`SOFT_CAP_ACTIVE_LEADS`] are considered first, and only when
//! the whole roster is at or over the cap does everyone compete.

use crate::lead::SOFT_CAP_ACTIVE_LEADS;
use crate::types::DbId;

/// One roster entry with its current active-lead count.
#[derive(Debug, Clone, Copy)]
pub struct SalespersonLoad {
    pub id: DbId,
    pub active_count: i64,
}

/// Pick the next assignee from a roster ordered by creation time
/// ascending (oldest first).
///
/// Within the chosen capacity group the least-loaded entry wins; ties
/// resolve to the earliest entry because the selection is stable over
/// the input order. An empty roster yields `None` and the lead stays
/// unassigned.
pub fn pick_assignee(loads: &[SalespersonLoad]) -> Option<DbId> {
    let mut under_cap: Vec<SalespersonLoad> = Vec::new();
    let mut at_or_over: Vec<SalespersonLoad> = Vec::new();
    for load in loads {
        if load.active_count < SOFT_CAP_ACTIVE_LEADS {
            under_cap.push(*load);
        } else {
            at_or_over.push(*load);
        }
    }

    let pool = if !under_cap.is_empty() {
        under_cap
    } else {
        at_or_over
    };

    // min_by_key keeps the first of equal minima, preserving roster order.
    pool.iter().min_by_key(|l| l.active_count).map(|l| l.id)
}

// ── Tests ────────────────────────────────────────────────────────────
