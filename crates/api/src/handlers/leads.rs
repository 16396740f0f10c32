//! Handlers for manual lead creation and the lead read/update surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use leadhub_core::error::CoreError;
use leadhub_core::lead::LeadStatus;
use leadhub_core::normalize::{clean_email, clean_phone, normalize_source, parse_budget_range};
use leadhub_core::types::DbId;
use leadhub_db::models::lead::{Lead, LeadFilter, NewLead, UpdateLead};
use leadhub_db::repositories::LeadRepo;

use crate::assignment::best_effort_assignee;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query parameter types
// ---------------------------------------------------------------------------

/// Body for manual lead creation.
///
/// `budget` is a free-text range ("50 lakh - 1 cr"); when present it wins
/// over the explicit `budgetMin`/`budgetMax` numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub company_id: Option<DbId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub property_interest: Option<String>,
    pub budget: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub is_broker: Option<bool>,
    pub broker_name: Option<String>,
    pub broker_cut_pct: Option<f64>,
    pub source: Option<String>,
    pub campaign: Option<String>,
    pub adset: Option<String>,
    pub ad_id: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
}

/// Query parameters for lead listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadListParams {
    pub company_id: Option<DbId>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub assigned_to: Option<DbId>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatsParams {
    pub company_id: Option<DbId>,
}

/// Body for the status-only update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// One page of leads.
#[derive(Debug, Serialize)]
pub struct LeadListPage {
    pub items: Vec<Lead>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

// ---------------------------------------------------------------------------
// Manual creation
// ---------------------------------------------------------------------------

/// POST /api/v1/leads
///
/// Manual lead entry: normalize, best-effort assign, insert. A duplicate
/// `(company, phone)` pair maps to 409; no row is written in that case.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(body): Json<CreateLeadRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lead>>)> {
    let company_id = body
        .company_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("companyId is required".into())))?;
    let first_name = body
        .first_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("firstName is required".into())))?;
    let phone = clean_phone(body.phone.as_deref().unwrap_or(""));
    if phone.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "phone is required".into(),
        )));
    }

    // Free-text budget wins over the explicit numeric pair.
    let (budget_min, budget_max) = match body.budget.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            let range = parse_budget_range(text);
            (range.min, range.max)
        }
        _ => (body.budget_min, body.budget_max),
    };

    let assigned_to = best_effort_assignee(&state, company_id).await;

    let new_lead = NewLead {
        company_id,
        assigned_to,
        first_name: first_name.to_string(),
        last_name: body.last_name.as_deref().unwrap_or("").trim().to_string(),
        phone,
        email: clean_email(body.email.as_deref().unwrap_or("")),
        location: body.location.unwrap_or_default(),
        property_interest: body.property_interest.unwrap_or_default(),
        budget_min,
        budget_max,
        source: normalize_source(body.source.as_deref().unwrap_or("")),
        campaign: body.campaign.unwrap_or_default(),
        adset: body.adset.unwrap_or_default(),
        ad_id: body.ad_id.unwrap_or_default(),
        is_broker: body.is_broker.unwrap_or(false),
        broker_name: body.broker_name.unwrap_or_default(),
        broker_cut_pct: body.broker_cut_pct,
        created_by: body.created_by,
        notes: body.notes.unwrap_or_default(),
        ..Default::default()
    };

    let lead = LeadRepo::create(&state.pool, &new_lead).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

// ---------------------------------------------------------------------------
// Listing & stats
// ---------------------------------------------------------------------------

/// GET /api/v1/leads
///
/// Filtered, paginated listing, newest first.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<DataResponse<LeadListPage>>> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    let filter = LeadFilter {
        company_id: params.company_id,
        status: params.status,
        source: params.source,
        assigned_to: params.assigned_to,
        search: params.search,
    };

    let items = LeadRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = LeadRepo::count(&state.pool, &filter).await?;
    let pages = (total + limit - 1) / limit;

    Ok(Json(DataResponse {
        data: LeadListPage {
            items,
            total,
            page,
            pages,
        },
    }))
}

/// GET /api/v1/leads/stats
///
/// Per-status lead counts for board counters. The five board columns are
/// always present, zero-filled; statuses outside them appear only when
/// non-zero.
pub async fn get_lead_stats(
    State(state): State<AppState>,
    Query(params): Query<LeadStatsParams>,
) -> AppResult<Json<DataResponse<BTreeMap<String, i64>>>> {
    let company_id = params
        .company_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("companyId is required".into())))?;

    let mut stats: BTreeMap<String, i64> = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::SiteVisit,
        LeadStatus::BookingDone,
        LeadStatus::Dropped,
    ]
    .iter()
    .map(|s| (s.as_str().to_string(), 0))
    .collect();

    for (status, count) in LeadRepo::status_counts(&state.pool, company_id).await? {
        stats.insert(status, count);
    }

    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// PATCH /api/v1/leads/{id}/status
///
/// Set the workflow tag. Any vocabulary value may follow any other;
/// out-of-vocabulary labels are rejected with 400.
pub async fn update_lead_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let status = LeadStatus::parse(&body.status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown status: {}",
            body.status
        )))
    })?;

    let lead = LeadRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: id.to_string(),
        }))?;

    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/leads/{id}
///
/// Partial update; absent fields keep their stored value.
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateLead>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = LeadRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: id.to_string(),
        }))?;

    Ok(Json(DataResponse { data: lead }))
}
