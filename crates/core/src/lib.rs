//! Pure domain logic for the lead ingestion & assignment core.
//!
//! This crate has no I/O: no database access, no HTTP, no filesystem.
//! It provides the canonical lead vocabulary, input normalization for the
//! four ingestion channels, the selection half of the assignment policy,
//! and the row-mapping logic for bulk file import.

pub mod assignment;
pub mod error;
pub mod import;
pub mod lead;
pub mod normalize;
pub mod types;
