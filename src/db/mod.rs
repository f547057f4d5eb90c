//! Database layer (document store).
//!
//! [`Database`] exposes typed operations for every collection and delegates
//! the underlying get/find/put/delete calls to either Firestore or an
//! in-process store with the same semantics.

pub mod database;
pub mod firestore;
pub mod memory;

pub use database::Database;

use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const SESSIONS: &str = "sessions";
    pub const EXCURSIONS: &str = "excursions";
    pub const REVIEWS: &str = "reviews";
}

/// A record stored as one document, keyed by its own `id` field.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    fn doc_id(&self) -> &str;
}

impl Document for crate::models::User {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

impl Document for crate::models::Session {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

impl Document for crate::models::Excursion {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

impl Document for crate::models::Review {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

/// Scalar a document field is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Equality filter on one top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: &'static str,
    pub value: FieldValue,
}

impl FieldFilter {
    pub fn eq(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Whether a JSON document satisfies this filter.
    pub fn matches(&self, doc: &serde_json::Value) -> bool {
        match (&self.value, doc.get(self.field)) {
            (FieldValue::Text(expected), Some(serde_json::Value::String(actual))) => {
                expected == actual
            }
            (FieldValue::Bool(expected), Some(serde_json::Value::Bool(actual))) => {
                expected == actual
            }
            _ => false,
        }
    }
}

/// Equality filters (all must match) plus an optional descending sort key.
#[derive(Debug, Clone, Default)]
pub struct DocQuery {
    pub filters: Vec<FieldFilter>,
    pub newest_first_by: Option<&'static str>,
}

impl DocQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &'static str, value: impl Into<FieldValue>) -> Self {
        self.filters.push(FieldFilter::eq(field, value));
        self
    }

    /// Add a filter only when `value` is present.
    pub fn filter_opt<V: Into<FieldValue>>(self, field: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.filter(field, v),
            None => self,
        }
    }

    /// Sort by an ISO-8601 timestamp field, most recent first.
    pub fn newest_first(mut self, field: &'static str) -> Self {
        self.newest_first_by = Some(field);
        self
    }
}
