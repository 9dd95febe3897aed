// src/store/page.rs
//! The page envelope every fetch resolves to, and the query that asks
//! for one.
//!
//! Invariant enforced here, not re-checked downstream: a page with no
//! cursor never claims more data. A store may report `has_more == false`
//! while still handing back a cursor; the controller stops on the flag,
//! never on cursor presence alone.

use crate::constants::MAX_PAGE_SIZE;
use crate::record::Record;
use crate::resources::{ActionTag, Resource};
use crate::types::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque resumption token handed out by a store.
///
/// Callers never construct or parse one; they only pass it back to the
/// same store that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Only data sources construct cursors; callers receive them from a
    /// page and hand them back unchanged.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for handing back to the wire.
    pub(crate) fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page worth of query, addressed to a collection.
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub collection: &'static str,
    pub cursor: Option<Cursor>,
    pub page_size: u32,
    pub tag: Option<ActionTag>,
}

impl PageQuery {
    /// First-page query for a resource. `cursor == None` means page one.
    pub fn first(resource: Resource, page_size: u32) -> Result<Self, ValidationError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize {
                value: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self {
            collection: resource.collection(),
            cursor: None,
            page_size,
            tag: None,
        })
    }

    /// Narrows the query by an action tag before pagination applies.
    pub fn with_tag(mut self, tag: ActionTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// The same query resumed from a cursor.
    pub fn resume_from(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// One fetched page of records plus where to resume.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    items: Vec<Record>,
    next_cursor: Option<Cursor>,
    has_more: bool,
}

impl Page {
    /// Builds a page, normalizing the envelope invariant: without a
    /// cursor there is nowhere to resume, so `has_more` is forced false.
    pub fn new(items: Vec<Record>, next_cursor: Option<Cursor>, has_more: bool) -> Self {
        let has_more = has_more && next_cursor.is_some();
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// The final page: nothing to resume.
    pub fn last(items: Vec<Record>) -> Self {
        Self::new(items, None, false)
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Decomposes the page for accumulation by a controller.
    pub fn into_parts(self) -> (Vec<Record>, Option<Cursor>, bool) {
        (self.items, self.next_cursor, self.has_more)
    }
}
