// tests/integration/mod.rs
//! End-to-end tests over the in-memory store.

pub mod listing_flow;

use carelist::Record;
use serde_json::json;

/// A record with the conventional id and ordering fields filled in.
pub fn record(id: &str, name: &str, created_at: &str) -> Record {
    let mut record = Record::new();
    record.set("id", json!(id));
    record.set("name", json!(name));
    record.set("created_at", json!(created_at));
    record
}

/// Records named after `names`, ids and timestamps in listing order.
pub fn named_records(names: &[&str]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            record(
                &format!("r{}", i + 1),
                name,
                &format!("2024-03-01T00:00:{:02}Z", i),
            )
        })
        .collect()
}
