//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus the insert/update DTOs the
//! repositories accept.

pub mod audit;
pub mod company;
pub mod lead;
pub mod salesperson;
