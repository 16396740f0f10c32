//! Route definitions for the ad-platform webhook channels.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Webhook routes mounted at `/webhooks`.
///
/// ```text
/// GET  /meta    -> meta_verify (subscription handshake)
/// POST /meta    -> meta_deliver (always acknowledges 200)
/// POST /google  -> google_deliver (?pageId=...)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/meta",
            get(webhooks::meta_verify).post(webhooks::meta_deliver),
        )
        .route("/google", post(webhooks::google_deliver))
}
