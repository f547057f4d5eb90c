// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store with the same query semantics as Firestore.
//!
//! Documents are held as JSON values, so everything written goes through the
//! same serde representation the real store sees.

use crate::db::{DocQuery, Document};
use crate::error::AppError;
use dashmap::DashMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

type Collection = BTreeMap<String, Value>;

/// Shared in-memory store; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, Collection>>,
}

fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Database(e.to_string()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Document>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError> {
        let value = self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned());
        value.map(decode).transpose()
    }

    pub fn find<T>(&self, collection: &str, query: &DocQuery) -> Result<Vec<T>, AppError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut matched: Vec<Value> = match self.collections.get(collection) {
            Some(docs) => docs
                .values()
                .filter(|doc| query.filters.iter().all(|f| f.matches(doc)))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        if let Some(field) = query.newest_first_by {
            matched.sort_by(|a, b| {
                let a = a.get(field).and_then(Value::as_str);
                let b = b.get(field).and_then(Value::as_str);
                b.cmp(&a)
            });
        }

        matched.into_iter().map(decode).collect()
    }

    pub fn put<T: Document>(&self, collection: &str, doc: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(doc).map_err(|e| AppError::Database(e.to_string()))?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc.doc_id().to_string(), value);
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    pub fn delete_where(&self, collection: &str, query: &DocQuery) -> Result<usize, AppError> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|_, doc| !query.filters.iter().all(|f| f.matches(doc)));
        Ok(before - docs.len())
    }
}
