//! Handler for bulk lead import from an uploaded CSV or spreadsheet.
//!
//! Per-row isolation is the contract here: a malformed or duplicate row
//! increments a counter and records `{row, reason, data}` without
//! stopping the rest of the batch. The staged upload is a
//! [`tempfile::NamedTempFile`], so it is removed on every exit path,
//! early returns included.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use calamine::Reader as _;
use serde::Serialize;

use leadhub_core::error::CoreError;
use leadhub_core::import::{map_row, FileKind, RowRecord};
use leadhub_core::types::DbId;
use leadhub_db::models::lead::NewLead;
use leadhub_db::repositories::{CompanyRepo, LeadInsertError, LeadRepo};

use crate::assignment::best_effort_assignee;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A row that was skipped or failed, with enough detail to fix the file.
#[derive(Debug, Serialize)]
pub struct SkippedRow {
    /// 1-based row number in the uploaded file (header excluded).
    pub row: u32,
    pub reason: String,
    /// The raw row as uploaded, for correction.
    pub data: serde_json::Value,
}

/// Final report for one import call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub created: u32,
    pub skipped: u32,
    pub errors: u32,
    pub total: u32,
    pub skipped_rows: Vec<SkippedRow>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/leads/import
///
/// Multipart form: `file` (csv/xls/xlsx) + `companyId`. Whole-request
/// failures (missing file, unknown company, unsupported extension) abort
/// before any row is written; everything after that is per-row.
pub async fn import_leads(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let mut company_id: Option<DbId> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                upload = Some((filename, data.to_vec()));
            }
            Some("companyId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                company_id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest("companyId must be a numeric id".into())
                })?);
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".into()))?;
    let company_id = company_id.ok_or_else(|| {
        AppError::BadRequest("companyId is required (select a company first)".into())
    })?;

    CompanyRepo::find_by_id(&state.pool, company_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id: company_id.to_string(),
        }))?;

    let ext = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let kind = FileKind::from_extension(ext)
        .ok_or_else(|| AppError::BadRequest("Unsupported file type. Use CSV/XLS/XLSX".into()))?;

    // Stage the upload; the temp file is unlinked when `staged` drops,
    // on success and on every error path alike.
    let staged = tempfile::Builder::new()
        .prefix("leadhub-import-")
        .suffix(&format!(".{ext}"))
        .tempfile()
        .map_err(|e| AppError::InternalError(format!("Failed to stage upload: {e}")))?;
    tokio::fs::write(staged.path(), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to stage upload: {e}")))?;

    // csv/calamine are synchronous readers; keep them off the async workers.
    let staged_path = staged.path().to_path_buf();
    let rows = tokio::task::spawn_blocking(move || read_rows(&staged_path, kind))
        .await
        .map_err(|e| AppError::InternalError(format!("Row reader task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("File parsing failed: {e}")))?;

    let mut report = ImportReport {
        created: 0,
        skipped: 0,
        errors: 0,
        total: rows.len() as u32,
        skipped_rows: Vec::new(),
    };

    for (index, row) in rows.iter().enumerate() {
        let row_number = (index + 1) as u32;
        let mapped = map_row(row);

        if mapped.phone.is_empty() {
            report.skipped += 1;
            report.skipped_rows.push(SkippedRow {
                row: row_number,
                reason: "Missing phone".to_string(),
                data: row_json(row),
            });
            continue;
        }

        let assigned_to = best_effort_assignee(&state, company_id).await;

        let new_lead = NewLead {
            company_id,
            assigned_to,
            first_name: mapped.first_name,
            last_name: mapped.last_name,
            phone: mapped.phone,
            email: mapped.email,
            location: mapped.location,
            property_interest: mapped.property_interest,
            budget_min: mapped.budget.min,
            budget_max: mapped.budget.max,
            source: mapped.source,
            is_broker: mapped.is_broker,
            broker_name: mapped.broker_name,
            broker_cut_pct: mapped.broker_cut_pct,
            notes: mapped.notes,
            ..Default::default()
        };

        match LeadRepo::create(&state.pool, &new_lead).await {
            Ok(_) => report.created += 1,
            Err(LeadInsertError::Duplicate) => {
                report.skipped += 1;
                report.skipped_rows.push(SkippedRow {
                    row: row_number,
                    reason: "Duplicate phone/email".to_string(),
                    data: row_json(row),
                });
            }
            Err(LeadInsertError::Database(e)) => {
                tracing::error!(row = row_number, error = %e, "Lead import row failed");
                report.errors += 1;
                report.skipped_rows.push(SkippedRow {
                    row: row_number,
                    reason: "Unexpected error".to_string(),
                    data: row_json(row),
                });
            }
        }
    }

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Row readers
// ---------------------------------------------------------------------------

/// Error type for the synchronous row readers.
#[derive(Debug, thiserror::Error)]
enum RowReadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet has no sheets")]
    EmptyWorkbook,
}

/// Read all rows of the staged file as header -> cell maps.
fn read_rows(path: &Path, kind: FileKind) -> Result<Vec<RowRecord>, RowReadError> {
    match kind {
        FileKind::Csv => {
            let mut reader = csv::Reader::from_path(path)?;
            let headers = reader.headers()?.clone();
            let mut rows = Vec::new();
            for record in reader.records() {
                let record = record?;
                let row: RowRecord = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.to_string(), v.to_string()))
                    .collect();
                rows.push(row);
            }
            Ok(rows)
        }
        FileKind::Spreadsheet => {
            let mut workbook = calamine::open_workbook_auto(path)?;
            let range = workbook
                .worksheet_range_at(0)
                .ok_or(RowReadError::EmptyWorkbook)??;

            let mut sheet_rows = range.rows();
            let headers: Vec<String> = match sheet_rows.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
                None => return Ok(Vec::new()),
            };

            let mut rows = Vec::new();
            for sheet_row in sheet_rows {
                let row: RowRecord = headers
                    .iter()
                    .cloned()
                    .zip(sheet_row.iter().map(|cell| cell.to_string()))
                    .collect();
                rows.push(row);
            }
            Ok(rows)
        }
    }
}

/// The raw row as a JSON object for the skipped/error report.
fn row_json(row: &RowRecord) -> serde_json::Value {
    serde_json::to_value(row).unwrap_or(serde_json::Value::Null)
}
