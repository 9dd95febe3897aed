// src/store/memory.rs
//! In-process document store with the same contract as the gateway.
//!
//! Backs the CLI's offline mode and the test suite. Ordering is the same
//! stable (created_at, id) sort the gateway applies, so pagination over
//! this store is deterministic per cursor, exactly like production.

use super::page::{Cursor, Page, PageQuery};
use super::DocumentStore;
use crate::constants::{ACTION_FIELD, CREATED_AT_FIELD, ID_FIELD};
use crate::error::{StoreError, StoreErrorCode};
use crate::record::Record;
use crate::types::RecordId;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Record>>,
    fail_queue: VecDeque<StoreError>,
    fetch_log: Vec<String>,
}

/// An in-memory `DocumentStore`, cheaply cloneable and shareable.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with sample data for every resource, used by
    /// the CLI's offline mode.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.seed("medicines", demo_medicines());
        store.seed("categories", demo_named("categories", &["Antibiotics", "Analgesics", "Antacids", "Vitamins"]));
        store.seed("diseases", demo_named("diseases", &["Influenza", "Diabetes", "Hypertension"]));
        store.seed("pharmacies", demo_named("pharmacies", &["City Pharmacy", "Green Cross", "Wellness Point"]));
        store.seed("labs", demo_named("labs", &["Central Lab", "QuickTest Diagnostics"]));
        store.seed("ambulances", demo_named("ambulances", &["Unit 12", "Unit 7"]));
        store.seed("users", demo_users());
        store
    }

    /// Loads records into a collection, keeping the stable sort order.
    pub fn seed(&self, collection: &str, records: Vec<Record>) {
        let mut inner = self.inner.lock();
        let entries = inner.collections.entry(collection.to_string()).or_default();
        entries.extend(records);
        sort_stable(entries);
    }

    /// Arranges for the next `fetch_page` to fail with `error`.
    ///
    /// Queued failures apply in order, one per fetch, before any data is
    /// consulted.
    pub fn fail_next(&self, error: StoreError) {
        self.inner.lock().fail_queue.push_back(error);
    }

    /// Collections hit by `fetch_page` so far, in call order.
    pub fn fetch_log(&self) -> Vec<String> {
        self.inner.lock().fetch_log.clone()
    }

    /// Number of records currently in a collection.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.inner
            .lock()
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }
}

/// Stable sort key: creation time first, id as tiebreaker.
fn sort_key(record: &Record) -> (String, String) {
    let created = match record.get(CREATED_AT_FIELD) {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let id = record.id().map(|id| id.as_str().to_string()).unwrap_or_default();
    (created, id)
}

fn sort_stable(records: &mut [Record]) {
    records.sort_by_key(sort_key);
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, StoreError> {
        let mut inner = self.inner.lock();

        if let Some(error) = inner.fail_queue.pop_front() {
            return Err(error);
        }
        inner.fetch_log.push(query.collection.to_string());

        let all = inner
            .collections
            .get(query.collection)
            .cloned()
            .unwrap_or_default();

        let filtered: Vec<Record> = match &query.tag {
            Some(tag) => all
                .into_iter()
                .filter(|record| {
                    record.get(ACTION_FIELD).and_then(|v| v.as_str()) == Some(tag.as_str())
                })
                .collect(),
            None => all,
        };

        // A cursor is the id of the last record of the previous page.
        let start = match &query.cursor {
            None => 0,
            Some(cursor) => {
                let at = filtered
                    .iter()
                    .position(|record| {
                        record.id().is_some_and(|id| id.as_str() == cursor.token())
                    })
                    .ok_or_else(|| {
                        StoreError::service(
                            StoreErrorCode::InvalidArgument,
                            format!("unknown cursor: {}", cursor),
                        )
                    })?;
                at + 1
            }
        };

        let page_size = query.page_size as usize;
        let items: Vec<Record> = filtered.iter().skip(start).take(page_size).cloned().collect();
        let has_more = start + items.len() < filtered.len();
        let next_cursor = if has_more {
            // Resuming requires the last returned record to carry an id.
            items.last().and_then(Record::id).map(|id| Cursor::new(id.as_str()))
        } else {
            None
        };

        Ok(Page::new(items, next_cursor, has_more))
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let records = inner.collections.get_mut(collection).ok_or_else(|| {
            StoreError::service(
                StoreErrorCode::NotFound,
                format!("no such collection: {}", collection),
            )
        })?;

        let before = records.len();
        records.retain(|record| record.id().as_ref() != Some(id));
        if records.len() == before {
            return Err(StoreError::service(
                StoreErrorCode::NotFound,
                format!("no record {} in {}", id, collection),
            ));
        }
        Ok(())
    }

    async fn create(&self, collection: &str, mut record: Record) -> Result<RecordId, StoreError> {
        if record.id().is_none() {
            record.set(ID_FIELD, json!(uuid::Uuid::new_v4().simple().to_string()));
        }
        if record.get(CREATED_AT_FIELD).is_none() {
            record.set(CREATED_AT_FIELD, json!(chrono::Utc::now().to_rfc3339()));
        }
        let id = record.id().ok_or_else(|| {
            StoreError::MalformedResponse("created record lost its id".to_string())
        })?;

        let mut inner = self.inner.lock();
        let entries = inner.collections.entry(collection.to_string()).or_default();
        entries.push(record);
        sort_stable(entries);
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Demo data
// ---------------------------------------------------------------------------

fn demo_record(collection: &str, index: usize, name: &str) -> Record {
    let mut record = Record::new();
    record.set(ID_FIELD, json!(format!("{}-{:03}", collection, index)));
    record.set("name", json!(name));
    record.set(
        CREATED_AT_FIELD,
        json!(format!("2024-01-{:02}T08:00:00Z", (index % 28) + 1)),
    );
    record
}

fn demo_medicines() -> Vec<Record> {
    let names = [
        "Paracetamol", "Amoxicillin", "Ibuprofen", "Omeprazole", "Metformin",
        "Atorvastatin", "Cetirizine", "Azithromycin", "Losartan", "Amlodipine",
        "Salbutamol", "Prednisolone", "Ranitidine", "Ciprofloxacin", "Doxycycline",
        "Naproxen", "Loratadine", "Gabapentin", "Sertraline", "Fluoxetine",
        "Warfarin", "Clopidogrel", "Simvastatin", "Levothyroxine", "Insulin",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut record = demo_record("medicines", i, name);
            record.set("price", json!(5.0 + i as f64));
            record.set("stock", json!(100 - i as i64));
            record
        })
        .collect()
}

fn demo_named(collection: &str, names: &[&str]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| demo_record(collection, i, name))
        .collect()
}

fn demo_users() -> Vec<Record> {
    let users = [
        ("Asha Verma", "approved"),
        ("Rahul Singh", "pending"),
        ("Meera Iyer", "approved"),
        ("Devika Rao", "blocked"),
        ("Arjun Patel", "pending"),
    ];
    users
        .iter()
        .enumerate()
        .map(|(i, (name, action))| {
            let mut record = demo_record("users", i, name);
            record.set(ACTION_FIELD, json!(action));
            record
        })
        .collect()
}
