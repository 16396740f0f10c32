//! Canonical lead vocabulary: sources, statuses, and the assignment cap.

use serde::{Deserialize, Serialize};

/// Default currency code for budgets.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Placeholder first name for rows and payloads that arrive without one.
pub const UNKNOWN_FIRST_NAME: &str = "—";

/// Soft cap on concurrent non-terminal leads per salesperson.
///
/// Salespersons at or above this count are only assigned to when every
/// roster member is at or above it; it is never a hard limit.
pub const SOFT_CAP_ACTIVE_LEADS: i64 = 10;

/// Statuses that no longer count toward a salesperson's load.
pub const TERMINAL_STATUSES: &[&str] = &["booking_done", "dropped"];

// ── Lead source ──────────────────────────────────────────────────────

/// Where a lead came from.
///
/// `WalkIn` and `Agent` are produced by source-label normalization even
/// though no ingestion channel defaults to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Facebook,
    Google,
    Website,
    Manual,
    Csv,
    Referral,
    WalkIn,
    Agent,
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Google => "google",
            Self::Website => "website",
            Self::Manual => "manual",
            Self::Csv => "csv",
            Self::Referral => "referral",
            Self::WalkIn => "walk_in",
            Self::Agent => "agent",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Lead status ──────────────────────────────────────────────────────

/// Workflow status label.
///
/// This is a free-form tag from a fixed vocabulary: any status may follow
/// any other (a `dropped` lead can go back to `new`). There is no
/// transition graph; that is a product decision, not an omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    SiteVisit,
    Accepted,
    NotAccepted,
    Paid,
    Unpaid,
    BookingDone,
    DocumentUploaded,
    DocumentNotUploaded,
    Dropped,
}

impl LeadStatus {
    /// The full status vocabulary, in board order.
    pub const ALL: &'static [LeadStatus] = &[
        Self::New,
        Self::Contacted,
        Self::SiteVisit,
        Self::Accepted,
        Self::NotAccepted,
        Self::Paid,
        Self::Unpaid,
        Self::BookingDone,
        Self::DocumentUploaded,
        Self::DocumentNotUploaded,
        Self::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::SiteVisit => "site_visit",
            Self::Accepted => "accepted",
            Self::NotAccepted => "not_accepted",
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::BookingDone => "booking_done",
            Self::DocumentUploaded => "document_uploaded",
            Self::DocumentNotUploaded => "document_not_uploaded",
            Self::Dropped => "dropped",
        }
    }

    /// Parse a status label. Returns `None` for anything outside the
    /// vocabulary.
    pub fn parse(s: &str) -> Option<LeadStatus> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Terminal statuses do not count toward a salesperson's active load.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::BookingDone | Self::Dropped)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
