//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod audit_log_repo;
pub mod company_repo;
pub mod lead_repo;
pub mod salesperson_repo;

pub use audit_log_repo::AuditLogRepo;
pub use company_repo::CompanyRepo;
pub use lead_repo::{LeadInsertError, LeadRepo};
pub use salesperson_repo::SalespersonRepo;
