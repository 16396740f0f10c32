use std::sync::Arc;

use leadhub_adplatform::AdPlatformClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: leadhub_db::DbPool,
    /// Server configuration (webhook verify token, Graph API base, timeouts).
    pub config: Arc<ServerConfig>,
    /// Ad-platform client used by the Meta webhook to fetch full lead records.
    pub ad_client: Arc<AdPlatformClient>,
}
