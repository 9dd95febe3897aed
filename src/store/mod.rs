// src/store/mod.rs
//! Document-store interaction, the ability to page, mutate, and create
//! records in a collection.
//!
//! Business logic depends on the `DocumentStore` trait, never on HTTP
//! details. The store is an explicitly constructed, injectable object;
//! there are no ambient client singletons anywhere in the crate.

mod http;
mod memory;
mod page;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use page::{Cursor, Page, PageQuery};

use crate::error::StoreError;
use crate::record::Record;
use crate::types::RecordId;

/// The ability to read and mutate collections of records.
///
/// `fetch_page` is the paginated fetch contract's foundation: it must be
/// deterministic in ordering for a fixed cursor (backends order by
/// creation time, then id) and must resolve every failure to a
/// `StoreError` value rather than panicking.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, StoreError>;

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), StoreError>;

    async fn create(&self, collection: &str, record: Record) -> Result<RecordId, StoreError>;
}
