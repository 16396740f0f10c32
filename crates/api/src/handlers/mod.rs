//! Request handlers for the lead ingestion & assignment core.
//!
//! Each submodule covers one ingestion channel or read surface. Handlers
//! delegate to the repositories in `leadhub_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod import;
pub mod leads;
pub mod webhooks;
