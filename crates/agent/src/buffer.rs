// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result buffer: completed work awaiting server acknowledgement.
//!
//! Workers record results here as they finish; the sync loop snapshots the
//! buffer, reports it, and discards only what that snapshot contained. A
//! result recorded mid-poll is never dropped unreported.

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use roost_core::TaskId;

#[derive(Debug, Default)]
pub struct ResultBuffer {
    inner: Mutex<IndexMap<TaskId, Value>>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished task's result. A later result for the same id
    /// replaces the earlier one.
    pub fn record(&self, id: TaskId, result: Value) {
        debug!(task = %id, "result buffered");
        self.inner.lock().insert(id, result);
    }

    /// Copy of everything currently buffered, in completion order.
    pub fn snapshot(&self) -> IndexMap<TaskId, Value> {
        self.inner.lock().clone()
    }

    /// Drop acknowledged results, leaving anything recorded since the
    /// snapshot in place.
    pub fn discard<'a>(&self, ids: impl IntoIterator<Item = &'a TaskId>) {
        let mut inner = self.inner.lock();
        for id in ids {
            inner.shift_remove(id);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
