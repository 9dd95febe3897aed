// src/types/mod.rs
//! Validated domain types shared across the crate.
//!
//! Raw strings from the CLI, the environment, and the wire are promoted
//! into these types at the edges; everything past the edge works with
//! values that have already been checked.

mod ids;

pub use ids::{ApiKey, RecordId};

use thiserror::Error;

/// Validation failures caught before any network call is made.
///
/// These never reach the pagination controller; they are surfaced inline
/// at the configuration or form boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid record id: {input:?}")]
    InvalidRecordId { input: String },

    #[error("Unknown resource: {input:?}")]
    UnknownResource { input: String },

    #[error("Invalid store endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Page size must be between 1 and {max}, got {value}")]
    InvalidPageSize { value: u32, max: u32 },

    #[error("Missing required field: {name}")]
    MissingField { name: String },
}
