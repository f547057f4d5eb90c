// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-key async mutexes for in-process serialization of read-modify-write
//! sequences (aggregate recompute, whole-document excursion writes).
//!
//! An entry lives only while some task holds or waits for its key, so keys
//! that never exist (or no longer do) do not accumulate.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// Shared lock table; clones share the same locks.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<LockTable>,
}

/// Exclusive access to one key; the table entry is released with it.
pub struct KeyGuard {
    key: String,
    locks: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the table's own reference left: no holder, no waiter.
        // Runs under the shard lock, so a concurrent `lock` either cloned
        // the entry first or inserts a fresh one afterwards.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Held until the guard is dropped.
    pub async fn lock(&self, key: &str) -> KeyGuard {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = lock.lock_owned().await;
        KeyGuard {
            key: key.to_string(),
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }
}
