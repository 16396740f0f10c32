//! HTTP client for fetching full leadgen records.

use std::time::Duration;

use crate::fields::LeadFieldData;

/// Default Graph API base URL (overridable for tests and API upgrades).
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";

/// Per-request timeout for the leadgen fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for leadgen fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum AdPlatformError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform returned a non-2xx status code.
    #[error("Graph API returned HTTP {0}")]
    HttpStatus(u16),
}

/// Fetches full lead records from the ad platform.
pub struct AdPlatformClient {
    client: reqwest::Client,
    graph_base: String,
}

impl AdPlatformClient {
    /// Create a client with a pre-configured HTTP client and base URL.
    pub fn new(graph_base: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, graph_base }
    }

    /// Fetch one leadgen record by its platform ID.
    ///
    /// The access token is passed as a query parameter, never embedded in
    /// the path, so it cannot leak into request-path logs.
    pub async fn fetch_lead(
        &self,
        leadgen_id: &str,
        access_token: &str,
    ) -> Result<LeadFieldData, AdPlatformError> {
        let url = format!("{}/{leadgen_id}", self.graph_base);
        let response = self
            .client
            .get(&url)
            .query(&[("access_token", access_token)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdPlatformError::HttpStatus(response.status().as_u16()));
        }

        let data = response.json::<LeadFieldData>().await?;
        tracing::debug!(leadgen_id, fields = data.field_data.len(), "Fetched leadgen record");
        Ok(data)
    }
}

impl Default for AdPlatformClient {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_API_BASE.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
