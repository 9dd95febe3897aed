// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! The store layer never throws past its boundary: every failure a fetch
//! can hit resolves to a `StoreError` value, which the controller stores
//! and the view renders inline. Only configuration and I/O at the CLI
//! edge use the wider `AppError`.

use crate::types::ValidationError;
use std::fmt;
use thiserror::Error;

/// Document-store error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"permission-denied"`,
/// the gateway's failure vocabulary is encoded in the type system. Each
/// variant tells you exactly what the store reported and enables
/// pattern-based recovery without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// The caller lacks permission for this collection or record
    PermissionDenied,
    /// The caller presented no valid credentials
    Unauthenticated,
    /// The requested record or collection does not exist
    NotFound,
    /// Quota or rate limit exceeded, back off and retry
    ResourceExhausted,
    /// The query was malformed (bad cursor, bad ordering field)
    InvalidArgument,
    /// The store is temporarily unavailable
    Unavailable,
    /// Store-side internal error
    Internal,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl StoreErrorCode {
    /// Parse a gateway error code string into the typed vocabulary.
    pub fn from_wire(code: &str) -> Self {
        match code {
            "permission-denied" => Self::PermissionDenied,
            "unauthenticated" => Self::Unauthenticated,
            "not-found" => Self::NotFound,
            "resource-exhausted" => Self::ResourceExhausted,
            "invalid-argument" => Self::InvalidArgument,
            "unavailable" => Self::Unavailable,
            "internal" => Self::Internal,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ResourceExhausted | Self::Unavailable | Self::Internal
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "permission-denied"),
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::NotFound => write!(f, "not-found"),
            Self::ResourceExhausted => write!(f, "resource-exhausted"),
            Self::InvalidArgument => write!(f, "invalid-argument"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Internal => write!(f, "internal"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// A failure reported by (or on the way to) the document store.
///
/// Cloneable by design: a controller keeps the last failure in its state
/// so the view can render it inline across redraws.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store error ({code}): {message}")]
    Service {
        code: StoreErrorCode,
        message: String,
    },

    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("Fetch timed out after {elapsed_secs}s")]
    Timeout { elapsed_secs: u64 },

    #[error("Malformed store response: {0}")]
    MalformedResponse(String),
}

impl StoreError {
    /// Shorthand for a service-coded error.
    pub fn service(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self::Service {
            code,
            message: message.into(),
        }
    }

    /// The typed code, when the store itself produced the failure.
    pub fn code(&self) -> Option<&StoreErrorCode> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Service { code, .. } => code.is_retryable(),
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::MalformedResponse(_) => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Main application error type for the CLI edge.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
