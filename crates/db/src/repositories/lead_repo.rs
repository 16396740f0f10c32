//! Repository for the `leads` table: the store gateway of the ingestion
//! core.
//!
//! The `(company_id, phone)` uniqueness invariant is enforced by the
//! partial unique index `uq_leads_company_phone`, never by an
//! application-level check-then-insert. [`LeadRepo::create`] translates
//! that constraint violation into [`LeadInsertError::Duplicate`] so every
//! adapter can react to duplicates without parsing driver errors.

use std::collections::HashMap;

use sqlx::PgPool;

use leadhub_core::lead::TERMINAL_STATUSES;
use leadhub_core::types::DbId;

use crate::models::lead::{Lead, LeadFilter, NewLead, UpdateLead};

const LEAD_COLUMNS: &str = "\
    id, company_id, assigned_to, first_name, last_name, phone, email, \
    location, property_interest, budget_min, budget_max, currency, source, \
    campaign, adset, ad_id, external_ref, is_broker, broker_name, \
    broker_cut_pct, status, project_id, property_id, created_by, notes, \
    created_at, updated_at";

/// Name of the partial unique index behind the duplicate-lead signal.
const UNIQUE_PHONE_CONSTRAINT: &str = "uq_leads_company_phone";

/// Outcome of a lead insert that callers must distinguish.
#[derive(Debug, thiserror::Error)]
pub enum LeadInsertError {
    /// The `(company_id, phone)` pair already exists.
    #[error("Duplicate lead: phone already exists for company")]
    Duplicate,

    /// Any other database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// CRUD and load-count operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a lead. The insert is a single atomic statement; the unique
    /// index decides duplicates, so concurrent identical inserts cannot
    /// both succeed.
    pub async fn create(pool: &PgPool, lead: &NewLead) -> Result<Lead, LeadInsertError> {
        let query = format!(
            "INSERT INTO leads (company_id, assigned_to, first_name, last_name, \
                 phone, email, location, property_interest, budget_min, budget_max, \
                 currency, source, campaign, adset, ad_id, external_ref, is_broker, \
                 broker_name, broker_cut_pct, created_by, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                 $15, $16, $17, $18, $19, $20, $21) \
             RETURNING {LEAD_COLUMNS}"
        );
        let result = sqlx::query_as::<_, Lead>(&query)
            .bind(lead.company_id)
            .bind(lead.assigned_to)
            .bind(&lead.first_name)
            .bind(&lead.last_name)
            .bind(&lead.phone)
            .bind(&lead.email)
            .bind(&lead.location)
            .bind(&lead.property_interest)
            .bind(lead.budget_min)
            .bind(lead.budget_max)
            .bind(&lead.currency)
            .bind(lead.source.as_str())
            .bind(&lead.campaign)
            .bind(&lead.adset)
            .bind(&lead.ad_id)
            .bind(&lead.external_ref)
            .bind(lead.is_broker)
            .bind(&lead.broker_name)
            .bind(lead.broker_cut_pct)
            .bind(lead.created_by)
            .bind(&lead.notes)
            .fetch_one(pool)
            .await;

        match result {
            Ok(lead) => Ok(lead),
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23505")
                        && db_err.constraint() == Some(UNIQUE_PHONE_CONSTRAINT)
                    {
                        return Err(LeadInsertError::Duplicate);
                    }
                }
                Err(LeadInsertError::Database(e))
            }
        }
    }

    /// Find a lead by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Per-salesperson count of a company's non-terminal leads.
    ///
    /// Salespersons with zero active leads are absent from the map; the
    /// caller defaults them to zero. This read is an eventually-consistent
    /// snapshot: nothing serializes it against concurrent inserts.
    pub async fn count_active_by_salesperson(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<HashMap<DbId, i64>, sqlx::Error> {
        let terminal: Vec<String> = TERMINAL_STATUSES.iter().map(|s| s.to_string()).collect();
        let rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT assigned_to, COUNT(*) FROM leads \
             WHERE company_id = $1 \
               AND assigned_to IS NOT NULL \
               AND NOT (status = ANY($2)) \
             GROUP BY assigned_to",
        )
        .bind(company_id)
        .bind(&terminal)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// List leads matching a filter, newest first, paginated.
    pub async fn list(
        pool: &PgPool,
        filter: &LeadFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_lead_filter(filter);
        let query = format!(
            "SELECT {LEAD_COLUMNS} FROM leads {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_lead_values(sqlx::query_as::<_, Lead>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count leads matching a filter.
    pub async fn count(pool: &PgPool, filter: &LeadFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_lead_filter(filter);
        let query = format!("SELECT COUNT(*) FROM leads {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.fetch_one(pool).await
    }

    /// Per-status lead counts for one company (board counters).
    pub async fn status_counts(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT status, COUNT(*) FROM leads WHERE company_id = $1 GROUP BY status",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    /// Set a lead's status. Any vocabulary value may follow any other;
    /// there is deliberately no transition check here.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $2 WHERE id = $1 RETURNING {LEAD_COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Partial update with COALESCE semantics: absent fields keep their
    /// stored value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 phone = COALESCE($4, phone), \
                 email = COALESCE($5, email), \
                 location = COALESCE($6, location), \
                 property_interest = COALESCE($7, property_interest), \
                 budget_min = COALESCE($8, budget_min), \
                 budget_max = COALESCE($9, budget_max), \
                 notes = COALESCE($10, notes), \
                 is_broker = COALESCE($11, is_broker), \
                 broker_name = COALESCE($12, broker_name), \
                 broker_cut_pct = COALESCE($13, broker_cut_pct), \
                 project_id = COALESCE($14, project_id), \
                 property_id = COALESCE($15, property_id), \
                 status = COALESCE($16, status) \
             WHERE id = $1 \
             RETURNING {LEAD_COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(&update.first_name)
            .bind(&update.last_name)
            .bind(&update.phone)
            .bind(&update.email)
            .bind(&update.location)
            .bind(&update.property_interest)
            .bind(update.budget_min)
            .bind(update.budget_max)
            .bind(&update.notes)
            .bind(update.is_broker)
            .bind(&update.broker_name)
            .bind(update.broker_cut_pct)
            .bind(update.project_id)
            .bind(update.property_id)
            .bind(update.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built lead queries.
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Build a WHERE clause and bind values from `LeadFilter`.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when no filters are active, or starts with `WHERE `.
fn build_lead_filter(filter: &LeadFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(company_id) = filter.company_id {
        conditions.push(format!("company_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(company_id));
    }

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.to_lowercase()));
    }

    if let Some(ref source) = filter.source {
        conditions.push(format!("source = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(source.to_lowercase()));
    }

    if let Some(assigned_to) = filter.assigned_to {
        conditions.push(format!("assigned_to = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(assigned_to));
    }

    if let Some(ref search) = filter.search {
        // One placeholder reused across the four searchable columns.
        conditions.push(format!(
            "(first_name ILIKE ${bind_idx} OR last_name ILIKE ${bind_idx} \
             OR phone ILIKE ${bind_idx} OR email ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{search}%")));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_lead_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
