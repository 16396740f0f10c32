//! Input normalization for heterogeneous lead channels.
//!
//! Budget strings, source labels, and contact fields arrive in whatever
//! shape the channel produced (free text from a form, spreadsheet cells,
//! webhook payloads) and leave in the canonical form the rest of the
//! pipeline expects. Pure functions, no I/O.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::lead::LeadSource;

/// Multiplier for budget parts mentioning "lakh".
const LAKH: f64 = 100_000.0;

/// Multiplier for budget parts mentioning "cr" / "crore".
const CRORE: f64 = 10_000_000.0;

/// Range separators: hyphen, en-dash, or the word "to".
static RANGE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:-|–|\bto\b)").expect("valid regex"));

/// A parsed budget range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BudgetRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Parse a free-text budget string into a numeric range.
///
/// Strips currency symbols and thousands separators, then splits on a
/// hyphen, en-dash, or the word "to". Each part is scaled by its own
/// magnitude suffix ("lakh", "cr"/"crore"), so `"50 lakh - 1 cr"` parses
/// to `{5_000_000, 10_000_000}`. A single value populates both ends;
/// empty or unparseable input yields `{None, None}`.
pub fn parse_budget_range(input: &str) -> BudgetRange {
    let cleaned = input
        .replace(['₹', ','], "")
        .trim()
        .to_lowercase();
    if cleaned.is_empty() {
        return BudgetRange::default();
    }

    let parts: Vec<&str> = RANGE_SPLIT_RE
        .split(&cleaned)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() == 2 {
        return BudgetRange {
            min: Some(part_to_number(parts[0]).round() as i64),
            max: Some(part_to_number(parts[1]).round() as i64),
        };
    }

    let n = part_to_number(&cleaned);
    if n == 0.0 {
        BudgetRange::default()
    } else {
        let n = n.round() as i64;
        BudgetRange {
            min: Some(n),
            max: Some(n),
        }
    }
}

/// Parse one budget part: numeric prefix times its magnitude suffix.
fn part_to_number(part: &str) -> f64 {
    let s = part.trim().to_lowercase();
    let digits: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let numeric = leading_float(&digits);
    if s.contains("lakh") {
        numeric * LAKH
    } else if s.contains("cr") {
        // "cr" also covers "crore".
        numeric * CRORE
    } else {
        numeric
    }
}

/// Longest leading decimal prefix, or 0.0 if there is none.
fn leading_float(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Collapse a free-text source label onto the canonical [`LeadSource`]
/// vocabulary. Substring match, case-insensitive, in priority order;
/// anything unrecognized is `Manual`.
pub fn normalize_source(raw: &str) -> LeadSource {
    let s = raw.to_lowercase();
    if s.contains("facebook") || s.contains("meta") {
        LeadSource::Facebook
    } else if s.contains("google") {
        LeadSource::Google
    } else if s.contains("walk") {
        LeadSource::WalkIn
    } else if s.contains("agent") || s.contains("broker") {
        LeadSource::Agent
    } else if s.contains("csv") {
        LeadSource::Csv
    } else {
        LeadSource::Manual
    }
}

/// Trim a phone number. An empty result means "no phone".
pub fn clean_phone(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trim and lowercase an email address.
pub fn clean_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ── Tests ────────────────────────────────────────────────────────────
