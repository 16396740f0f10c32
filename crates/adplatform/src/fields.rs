//! Field-list payload shape and contact extraction.
//!
//! The Graph API returns a lead as `{"field_data": [{"name", "values"}]}`
//! where field names depend on how the advertiser built the form: some
//! forms carry a single `full_name`, some carry discrete `first_name` /
//! `last_name`. Extraction walks the list in order; later fields win.

use serde::Deserialize;

/// Placeholder used when a form delivers no usable first name.
const UNKNOWN_FIRST_NAME: &str = "—";

/// One entry in the platform's field list.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadField {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A full leadgen record as returned by the Graph API.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadFieldData {
    #[serde(default)]
    pub field_data: Vec<LeadField>,
}

/// Contact fields extracted from a field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Extract name/phone/email from a field list.
///
/// `full_name` is split on whitespace into first/last; discrete
/// `first_name` / `last_name` fields override it when present. Empty
/// values never clobber an earlier non-empty one.
pub fn extract_contact(data: &LeadFieldData) -> ContactFields {
    let mut first_name = UNKNOWN_FIRST_NAME.to_string();
    let mut last_name = String::new();
    let mut phone = String::new();
    let mut email = String::new();

    for field in &data.field_data {
        let value = field.values.first().map(String::as_str).unwrap_or("");
        match field.name.as_str() {
            "full_name" => {
                let mut parts = value.split_whitespace();
                first_name = parts
                    .next()
                    .map(str::to_string)
                    .unwrap_or_else(|| UNKNOWN_FIRST_NAME.to_string());
                last_name = parts.collect::<Vec<_>>().join(" ");
            }
            "first_name" if !value.is_empty() => first_name = value.to_string(),
            "last_name" if !value.is_empty() => last_name = value.to_string(),
            "phone_number" if !value.is_empty() => phone = value.to_string(),
            "email" if !value.is_empty() => email = value.to_string(),
            _ => {}
        }
    }

    ContactFields {
        first_name,
        last_name,
        phone,
        email,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
