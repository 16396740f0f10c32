//! Pure row-mapping logic for bulk lead import.
//!
//! Spreadsheets arrive with wildly inconsistent column headers, so every
//! canonical field carries an ordered alias table of accepted header
//! spellings. Lookup takes the first alias whose cell is non-empty, which
//! also lets a later alias fill in when an earlier column exists but is
//! blank. File parsing itself (csv / calamine) lives in the api crate;
//! this module only maps already-parsed rows.

use std::collections::HashMap;

use crate::lead::{LeadSource, UNKNOWN_FIRST_NAME};
use crate::normalize::{
    clean_email, clean_phone, normalize_source, parse_budget_range, BudgetRange,
};

/// A parsed spreadsheet row: raw header -> raw cell value.
pub type RowRecord = HashMap<String, String>;

// ── Header alias tables ──────────────────────────────────────────────

pub const FIRST_NAME_ALIASES: &[&str] = &["Customer First Name", "First Name", "firstName"];
pub const LAST_NAME_ALIASES: &[&str] = &["Last Name", "lastName"];
pub const PHONE_ALIASES: &[&str] = &["Phone No", "phone", "Phone", "mobile"];
pub const EMAIL_ALIASES: &[&str] = &["email", "Email"];
pub const LOCATION_ALIASES: &[&str] = &["Location", "location"];
pub const PROPERTY_INTEREST_ALIASES: &[&str] = &["Property Interest", "propertyInterest"];
pub const BUDGET_ALIASES: &[&str] = &["Budget", "budget", "Budget Range"];
pub const IS_BROKER_ALIASES: &[&str] = &["Broker", "isBroker"];
pub const BROKER_NAME_ALIASES: &[&str] = &["Broker's Name", "brokerName"];
pub const BROKER_CUT_ALIASES: &[&str] = &["Broker's Cut", "brokerCutPct"];
pub const SOURCE_ALIASES: &[&str] = &["Source", "source"];
pub const NOTES_ALIASES: &[&str] = &["Notes", "notes"];

/// First non-empty cell among the aliases, in table order.
pub fn lookup<'a>(row: &'a RowRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| row.get(*alias))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

// ── File kind dispatch ───────────────────────────────────────────────

/// Supported bulk-import file kinds, detected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Spreadsheet,
}

impl FileKind {
    /// Detect the file kind from an extension (case-insensitive, without
    /// the dot). Anything else is unsupported and rejects the whole
    /// import before any row is processed.
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xls" | "xlsx" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

// ── Row mapping ──────────────────────────────────────────────────────

/// One spreadsheet row mapped onto canonical lead fields.
///
/// `phone` may be empty; the caller skips such rows without aborting
/// the batch.
#[derive(Debug, Clone)]
pub struct MappedRow {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub property_interest: String,
    pub budget: BudgetRange,
    pub is_broker: bool,
    pub broker_name: String,
    pub broker_cut_pct: Option<f64>,
    pub source: LeadSource,
    pub notes: String,
}

/// Map a raw row onto canonical fields via the alias tables.
pub fn map_row(row: &RowRecord) -> MappedRow {
    let budget = lookup(row, BUDGET_ALIASES)
        .map(parse_budget_range)
        .unwrap_or_default();

    let is_broker = lookup(row, IS_BROKER_ALIASES)
        .map(|v| v.to_lowercase().contains("yes"))
        .unwrap_or(false);

    let broker_cut_pct = lookup(row, BROKER_CUT_ALIASES)
        .and_then(|v| v.trim_end_matches('%').trim().parse::<f64>().ok());

    MappedRow {
        first_name: lookup(row, FIRST_NAME_ALIASES)
            .unwrap_or(UNKNOWN_FIRST_NAME)
            .to_string(),
        last_name: lookup(row, LAST_NAME_ALIASES).unwrap_or("").to_string(),
        phone: clean_phone(lookup(row, PHONE_ALIASES).unwrap_or("")),
        email: clean_email(lookup(row, EMAIL_ALIASES).unwrap_or("")),
        location: lookup(row, LOCATION_ALIASES).unwrap_or("").to_string(),
        property_interest: lookup(row, PROPERTY_INTEREST_ALIASES)
            .unwrap_or("")
            .to_string(),
        budget,
        is_broker,
        broker_name: lookup(row, BROKER_NAME_ALIASES).unwrap_or("").to_string(),
        broker_cut_pct,
        source: normalize_source(lookup(row, SOURCE_ALIASES).unwrap_or("upload")),
        notes: lookup(row, NOTES_ALIASES).unwrap_or("").to_string(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
