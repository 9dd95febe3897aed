// src/record.rs
//! Opaque records, the unit of everything this crate pages over.
//!
//! A record is an ordered field map. The pagination layers never
//! interpret fields, with two conventional exceptions: the `id` field
//! (needed for row-level delete) and the string rendering of values
//! (needed for the listing's search filter).

use crate::constants::ID_FIELD;
use crate::types::{RecordId, ValidationError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque mapping from field name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    /// The conventional stable identifier, when the record carries one.
    ///
    /// The convention is not enforced at the type level: records without
    /// an `id` still flow through pagination, they just cannot be the
    /// target of a row-level delete.
    pub fn id(&self) -> Option<RecordId> {
        let value = self.fields.get(ID_FIELD)?;
        let raw = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        RecordId::new(raw).ok()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any field's string rendering contains `term`,
    /// case-insensitively. An empty term matches every record.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.fields
            .values()
            .any(|value| render_value(value).to_lowercase().contains(&needle))
    }

    /// Form-boundary validation: every named field must be present and
    /// non-null. Checked before any network call is made.
    pub fn require_fields(&self, names: &[&str]) -> Result<(), ValidationError> {
        for name in names {
            match self.fields.get(*name) {
                Some(value) if !value.is_null() => {}
                _ => {
                    return Err(ValidationError::MissingField {
                        name: (*name).to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}

/// Renders a field value the way the search filter sees it.
///
/// Strings are matched without their JSON quotes; everything else uses
/// its JSON rendering.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
