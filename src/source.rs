// src/source.rs
//! The paginated fetch contract each resource exposes.
//!
//! A source is one resource's view of the store: given a cursor and a
//! page size, hand back a page. Sources carry an identity key so the
//! listing can tell when it has been rebound to a different resource
//! (or the same resource under a different tag) and must reset.

use crate::error::{StoreError, StoreErrorCode};
use crate::record::Record;
use crate::resources::{ActionTag, Resource};
use crate::store::{Cursor, DocumentStore, Page, PageQuery};
use crate::types::{RecordId, ValidationError};
use std::fmt;

/// Identity of a source: the collection plus any narrowing tag.
///
/// Two sources with equal keys page over the same data; a key change is
/// what triggers a listing reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub collection: &'static str,
    pub tag: Option<ActionTag>,
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}[{}]", self.collection, tag),
            None => write!(f, "{}", self.collection),
        }
    }
}

/// The ability to fetch one page of records at a time.
///
/// Implementations must be deterministic in ordering for a fixed cursor
/// and must resolve failures to `StoreError` values, never panic.
#[async_trait::async_trait]
pub trait PaginatedSource: Send + Sync {
    async fn fetch(&self, cursor: Option<Cursor>, page_size: u32)
        -> Result<Page, StoreError>;

    fn identity(&self) -> SourceKey;
}

/// Row-level mutations the listing's actions need.
#[async_trait::async_trait]
pub trait RecordActions: Send + Sync {
    async fn delete(&self, id: &RecordId) -> Result<(), StoreError>;

    async fn create(&self, record: Record) -> Result<RecordId, StoreError>;
}

/// Binds a store to one resource, yielding that resource's fetch
/// contract.
#[derive(Clone)]
pub struct ResourceSource<S> {
    store: S,
    resource: Resource,
    tag: Option<ActionTag>,
}

impl<S: DocumentStore> ResourceSource<S> {
    pub fn new(store: S, resource: Resource) -> Self {
        Self {
            store,
            resource,
            tag: None,
        }
    }

    /// The users variant: narrows the query by an action tag before
    /// pagination applies. The tag participates in the source identity,
    /// so changing it rebinds any listing using this source.
    pub fn users(store: S, tag: ActionTag) -> Self {
        Self {
            store,
            resource: Resource::Users,
            tag: Some(tag),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    fn query(&self, cursor: Option<Cursor>, page_size: u32) -> Result<PageQuery, ValidationError> {
        let mut query = PageQuery::first(self.resource, page_size)?;
        if let Some(tag) = &self.tag {
            query = query.with_tag(tag.clone());
        }
        Ok(query.resume_from(cursor))
    }
}

#[async_trait::async_trait]
impl<S: DocumentStore> PaginatedSource for ResourceSource<S> {
    async fn fetch(
        &self,
        cursor: Option<Cursor>,
        page_size: u32,
    ) -> Result<Page, StoreError> {
        let query = self.query(cursor, page_size).map_err(|e| {
            StoreError::service(StoreErrorCode::InvalidArgument, e.to_string())
        })?;
        self.store.fetch_page(&query).await
    }

    fn identity(&self) -> SourceKey {
        SourceKey {
            collection: self.resource.collection(),
            tag: self.tag.clone(),
        }
    }
}

#[async_trait::async_trait]
impl<S: DocumentStore> RecordActions for ResourceSource<S> {
    async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        self.store.delete(self.resource.collection(), id).await
    }

    async fn create(&self, record: Record) -> Result<RecordId, StoreError> {
        self.store.create(self.resource.collection(), record).await
    }
}
