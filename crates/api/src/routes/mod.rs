pub mod health;
pub mod leads;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /leads                       create (POST), list (GET)
/// /leads/stats                 per-status counts (GET)
/// /leads/import                bulk file import (POST multipart)
/// /leads/{id}                  partial update (PATCH)
/// /leads/{id}/status           status update (PATCH)
///
/// /webhooks/meta               verify (GET), lead delivery (POST)
/// /webhooks/google             lead delivery (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/leads", leads::router())
        .nest("/webhooks", webhooks::router())
}
