//! Client for the Meta Graph API leadgen endpoint.
//!
//! The webhook only delivers a lead *identifier*; the actual lead record
//! (name, phone, email as a field list) has to be fetched from the Graph
//! API with the owning company's page access token. The fetch is bounded
//! by a request timeout so a slow platform cannot stall webhook
//! processing.

pub mod client;
pub mod fields;

pub use client::{AdPlatformClient, AdPlatformError, DEFAULT_GRAPH_API_BASE};
pub use fields::{extract_contact, ContactFields, LeadField, LeadFieldData};
