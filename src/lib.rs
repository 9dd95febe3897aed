// src/lib.rs
//! carelist library, cursor-paginated listings for the care-platform
//! admin console.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `StoreError`, `StoreErrorCode`, `ValidationError`
//! - **Configuration**: `ListingConfig`, `StoreTarget`
//! - **Records and resources**: `Record`, `RecordId`, `Resource`, `ActionTag`
//! - **Store backends**: `DocumentStore`, `HttpStore`, `MemoryStore`, `Page`, `Cursor`
//! - **Fetch contract**: `PaginatedSource`, `RecordActions`, `ResourceSource`
//! - **Pagination**: `Pager`, `PaginationController`, `FetchTicket`, `ApplyOutcome`
//! - **Listing**: `Listing`

mod config;
pub mod constants;
mod controller;
mod error;
mod listing;
mod record;
mod resources;
mod source;
mod store;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result, StoreError, StoreErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ListingConfig, StoreTarget};

// --- Records and Resources ---
pub use crate::record::Record;
pub use crate::resources::{ActionTag, Resource};
pub use crate::types::{ApiKey, RecordId};

// --- Store Backends ---
pub use crate::store::{Cursor, DocumentStore, HttpStore, MemoryStore, Page, PageQuery};

// --- Fetch Contract ---
pub use crate::source::{PaginatedSource, RecordActions, ResourceSource, SourceKey};

// --- Pagination ---
pub use crate::controller::{ApplyOutcome, FetchTicket, Pager, PaginationController};

// --- Listing ---
pub use crate::listing::Listing;
