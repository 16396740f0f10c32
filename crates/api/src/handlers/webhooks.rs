//! Handlers for the two ad-platform webhook channels.
//!
//! The Meta channel redelivers on any non-success response, so its
//! delivery endpoint acknowledges 200 unconditionally: every failure
//! (unknown page, missing credential, fetch timeout, duplicate insert)
//! is handled internally, audited, and never surfaced to the platform.
//! The Google channel has no such retry contract and is allowed to
//! return client errors.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use leadhub_adplatform::extract_contact;
use leadhub_core::error::CoreError;
use leadhub_core::lead::{LeadSource, UNKNOWN_FIRST_NAME};
use leadhub_core::normalize::{clean_email, clean_phone};
use leadhub_core::types::DbId;
use leadhub_db::models::company::Company;
use leadhub_db::models::lead::NewLead;
use leadhub_db::repositories::{AuditLogRepo, CompanyRepo, LeadRepo};

use crate::assignment::best_effort_assignee;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Audit action for a successfully ingested webhook lead.
pub const ACTION_LEAD_RECEIVED: &str = "webhook:lead_received";

/// Audit action for a failed webhook item.
pub const ACTION_WEBHOOK_ERROR: &str = "webhook:error";

// ---------------------------------------------------------------------------
// Meta: verification handshake
// ---------------------------------------------------------------------------

/// Query parameters of the Meta verification GET.
#[derive(Debug, Deserialize)]
pub struct MetaVerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// GET /api/v1/webhooks/meta
///
/// One-time subscription handshake: echo the challenge back verbatim iff
/// the shared verify token matches, otherwise 403. Side-effect-free.
pub async fn meta_verify(
    State(state): State<AppState>,
    Query(params): Query<MetaVerifyParams>,
) -> AppResult<String> {
    let verified = params.mode.as_deref() == Some("subscribe")
        && params.verify_token.as_deref() == Some(state.config.meta_verify_token.as_str());

    if !verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Webhook verification failed".into(),
        )));
    }

    tracing::info!("Meta webhook verified");
    Ok(params.challenge.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Meta: lead delivery
// ---------------------------------------------------------------------------

/// Delivery payload: entries tagged with a page id, each carrying
/// changes that reference a leadgen id.
#[derive(Debug, Deserialize)]
pub struct MetaWebhookPayload {
    #[serde(default)]
    pub entry: Vec<MetaEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MetaEntry {
    pub id: Option<String>,
    #[serde(default)]
    pub changes: Vec<MetaChange>,
}

#[derive(Debug, Deserialize)]
pub struct MetaChange {
    pub value: Option<MetaChangeValue>,
}

#[derive(Debug, Deserialize)]
pub struct MetaChangeValue {
    pub leadgen_id: Option<String>,
}

/// POST /api/v1/webhooks/meta
///
/// Always acknowledges 200. The body is taken as raw bytes, not a typed
/// `Json` extractor, so even a malformed payload cannot produce the
/// non-success status that would trigger a redelivery storm.
pub async fn meta_deliver(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let payload: MetaWebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable Meta webhook payload; acknowledging anyway");
            return StatusCode::OK;
        }
    };

    for entry in &payload.entry {
        let Some(page_id) = entry.id.as_deref() else {
            continue;
        };

        let company = match CompanyRepo::find_by_page_id(&state.pool, page_id).await {
            Ok(Some(company)) => company,
            Ok(None) => {
                tracing::warn!(page_id, "No company mapped to webhook page id; skipping entry");
                continue;
            }
            Err(e) => {
                tracing::error!(page_id, error = %e, "Company lookup failed; skipping entry");
                continue;
            }
        };

        for change in &entry.changes {
            let Some(leadgen_id) = change.value.as_ref().and_then(|v| v.leadgen_id.as_deref())
            else {
                continue;
            };
            process_leadgen_change(&state, &company, page_id, leadgen_id).await;
        }
    }

    StatusCode::OK
}

/// Handle one leadgen change: fetch the full record from the Graph API,
/// normalize, assign, persist, audit. Failures stay inside this change.
async fn process_leadgen_change(
    state: &AppState,
    company: &Company,
    page_id: &str,
    leadgen_id: &str,
) {
    // Per-company credential only; a company without its own token fails
    // this entry instead of falling back to a shared secret.
    let Some(token) = company.page_access_token.as_deref() else {
        tracing::warn!(
            company_id = company.id,
            page_id,
            "Company has no page access token; skipping leadgen fetch"
        );
        audit(
            state,
            company.id,
            ACTION_WEBHOOK_ERROR,
            json!({
                "pageId": page_id,
                "leadgenId": leadgen_id,
                "error": "missing page access token",
            }),
        )
        .await;
        return;
    };

    let lead_data = match state.ad_client.fetch_lead(leadgen_id, token).await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(leadgen_id, error = %e, "Leadgen fetch failed");
            audit(
                state,
                company.id,
                ACTION_WEBHOOK_ERROR,
                json!({
                    "pageId": page_id,
                    "leadgenId": leadgen_id,
                    "error": e.to_string(),
                }),
            )
            .await;
            return;
        }
    };

    let contact = extract_contact(&lead_data);
    let assigned_to = best_effort_assignee(state, company.id).await;

    let new_lead = NewLead {
        company_id: company.id,
        assigned_to,
        first_name: contact.first_name,
        last_name: contact.last_name,
        phone: clean_phone(&contact.phone),
        email: clean_email(&contact.email),
        source: LeadSource::Facebook,
        external_ref: Some(leadgen_id.to_string()),
        ..Default::default()
    };

    match LeadRepo::create(&state.pool, &new_lead).await {
        Ok(_) => {
            audit(
                state,
                company.id,
                ACTION_LEAD_RECEIVED,
                json!({
                    "pageId": page_id,
                    "leadgenId": leadgen_id,
                    "source": "facebook",
                }),
            )
            .await;
        }
        Err(e) => {
            tracing::error!(leadgen_id, error = %e, "Webhook lead insert failed");
            audit(
                state,
                company.id,
                ACTION_WEBHOOK_ERROR,
                json!({
                    "pageId": page_id,
                    "leadgenId": leadgen_id,
                    "error": e.to_string(),
                }),
            )
            .await;
        }
    }
}

/// Write one audit record; an audit failure is logged, never propagated.
async fn audit(state: &AppState, company_id: DbId, action: &str, details: serde_json::Value) {
    if let Err(e) = AuditLogRepo::create(&state.pool, Some(company_id), action, &details).await {
        tracing::warn!(error = %e, action, "Audit record write failed");
    }
}

// ---------------------------------------------------------------------------
// Google: direct form post
// ---------------------------------------------------------------------------

/// Query parameters of the Google delivery POST.
#[derive(Debug, Deserialize)]
pub struct GoogleQueryParams {
    #[serde(rename = "pageId")]
    pub page_id: Option<String>,
}

/// Flat lead payload, field names as the form proxy sends them.
#[derive(Debug, Deserialize)]
pub struct GoogleLeadForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "campaignName")]
    pub campaign_name: Option<String>,
    #[serde(rename = "submissionId")]
    pub submission_id: Option<String>,
}

/// POST /api/v1/webhooks/google?pageId=...
///
/// Unlike the Meta channel this sender tolerates client errors, so an
/// unknown page id is a plain 404 and a duplicate lead a plain 409.
pub async fn google_deliver(
    State(state): State<AppState>,
    Query(params): Query<GoogleQueryParams>,
    Json(form): Json<GoogleLeadForm>,
) -> AppResult<StatusCode> {
    let page_id = params
        .page_id
        .ok_or_else(|| AppError::BadRequest("pageId is required".into()))?;

    let company = CompanyRepo::find_by_page_id(&state.pool, &page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id: page_id.clone(),
        }))?;

    let assigned_to = best_effort_assignee(&state, company.id).await;

    let new_lead = NewLead {
        company_id: company.id,
        assigned_to,
        first_name: form
            .first_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_FIRST_NAME.to_string()),
        last_name: form.last_name.unwrap_or_default(),
        phone: clean_phone(form.phone.as_deref().unwrap_or("")),
        email: clean_email(form.email.as_deref().unwrap_or("")),
        source: LeadSource::Google,
        campaign: form.campaign_name.unwrap_or_default(),
        external_ref: form.submission_id,
        ..Default::default()
    };

    LeadRepo::create(&state.pool, &new_lead).await?;

    Ok(StatusCode::OK)
}
