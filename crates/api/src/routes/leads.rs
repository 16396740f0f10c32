//! Route definitions for the lead surface.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{import, leads};
use crate::state::AppState;

/// Lead routes mounted at `/leads`.
///
/// ```text
/// POST  /              -> create_lead (manual entry)
/// GET   /              -> list_leads
/// GET   /stats         -> get_lead_stats
/// POST  /import        -> import_leads (multipart file + companyId)
/// PATCH /{id}          -> update_lead
/// PATCH /{id}/status   -> update_lead_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(leads::create_lead).get(leads::list_leads))
        .route("/stats", get(leads::get_lead_stats))
        .route("/import", post(import::import_leads))
        .route("/{id}", patch(leads::update_lead))
        .route("/{id}/status", patch(leads::update_lead_status))
}
