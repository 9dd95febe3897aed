// src/types/ids.rs
//! Newtypes for the two identifiers that cross crate boundaries.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token for the document-store gateway.
///
/// Validated once at configuration time so the HTTP layer can assume a
/// well-formed header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Minimum plausible key length; anything shorter is a paste error.
    const MIN_LENGTH: usize = 8;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.len() < Self::MIN_LENGTH {
            return Err(ValidationError::InvalidApiKey {
                reason: format!("too short (minimum {} characters)", Self::MIN_LENGTH),
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey {
                reason: "contains whitespace".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stable unique identifier of a record, by convention stored in the
/// record's `id` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidRecordId { input: value });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
