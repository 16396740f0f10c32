//! Lead entity and its insert/update DTOs.

use leadhub_core::lead::{LeadSource, LeadStatus, DEFAULT_CURRENCY};
use leadhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub company_id: DbId,
    pub assigned_to: Option<DbId>,

    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,

    pub property_interest: String,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub currency: String,

    pub source: String,
    pub campaign: String,
    pub adset: String,
    pub ad_id: String,
    pub external_ref: Option<String>,

    pub is_broker: bool,
    pub broker_name: String,
    pub broker_cut_pct: Option<f64>,

    pub status: String,
    pub project_id: Option<DbId>,
    pub property_id: Option<DbId>,

    pub created_by: Option<DbId>,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a lead. Built by the ingestion adapters, never
/// deserialized from a request body directly.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub company_id: DbId,
    pub assigned_to: Option<DbId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub property_interest: String,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub currency: String,
    pub source: LeadSource,
    pub campaign: String,
    pub adset: String,
    pub ad_id: String,
    pub external_ref: Option<String>,
    pub is_broker: bool,
    pub broker_name: String,
    pub broker_cut_pct: Option<f64>,
    pub created_by: Option<DbId>,
    pub notes: String,
}

impl Default for NewLead {
    fn default() -> Self {
        Self {
            company_id: 0,
            assigned_to: None,
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            email: String::new(),
            location: String::new(),
            property_interest: String::new(),
            budget_min: None,
            budget_max: None,
            currency: DEFAULT_CURRENCY.to_string(),
            source: LeadSource::Manual,
            campaign: String::new(),
            adset: String::new(),
            ad_id: String::new(),
            external_ref: None,
            is_broker: false,
            broker_name: String::new(),
            broker_cut_pct: None,
            created_by: None,
            notes: String::new(),
        }
    }
}

/// DTO for partial lead updates (all fields optional, COALESCE semantics).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLead {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub property_interest: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub notes: Option<String>,
    pub is_broker: Option<bool>,
    pub broker_name: Option<String>,
    pub broker_cut_pct: Option<f64>,
    pub project_id: Option<DbId>,
    pub property_id: Option<DbId>,
    pub status: Option<LeadStatus>,
}

/// Filter parameters for lead listing.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub company_id: Option<DbId>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub assigned_to: Option<DbId>,
    /// Case-insensitive substring over first/last name, phone, email.
    pub search: Option<String>,
}
