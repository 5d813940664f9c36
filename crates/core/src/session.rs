// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-beacon session state and the task lifecycle.
//!
//! A session owns everything the server knows about one beacon: its task
//! queue, per-task metadata, and when it last called in. Sessions are
//! owned exclusively by the [`BeaconRegistry`](crate::BeaconRegistry) and
//! shared as `Arc<Mutex<_>>`; the per-session lock serializes operator
//! writes against a concurrently arriving sync for the same beacon.

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::id::{BeaconId, TaskId};
use crate::task::{Task, TaskError, TaskInfo, TaskMeta, TaskSnapshot, TaskState};

/// Shared handle to one session.
pub type SharedSession = Arc<Mutex<BeaconSession>>;

/// Server-side record of one beacon's identity and task state.
///
/// Invariant: `tasks` and `infos` have identical key sets at all times.
/// Task ids are never removed; history is retained for the life of the
/// process.
#[derive(Debug)]
pub struct BeaconSession {
    id: BeaconId,
    last_seen_ms: u64,
    tasks: IndexMap<TaskId, Task>,
    infos: IndexMap<TaskId, TaskInfo>,
}

impl BeaconSession {
    pub fn new(id: BeaconId, clock: &impl Clock) -> Self {
        Self { id, last_seen_ms: clock.epoch_ms(), tasks: IndexMap::new(), infos: IndexMap::new() }
    }

    pub fn id(&self) -> BeaconId {
        self.id
    }

    /// Epoch milliseconds of the last sync (or creation, before any sync).
    pub fn last_seen_ms(&self) -> u64 {
        self.last_seen_ms
    }

    pub fn task_exists(&self, id: &TaskId) -> bool {
        self.infos.contains_key(id)
    }

    pub fn task_count(&self) -> usize {
        self.infos.len()
    }

    /// Queue a new pending task and return its id.
    ///
    /// The payload must be a JSON object; anything else is rejected with a
    /// typed error (mapped to a null marker at the control-plane surface,
    /// never a panic).
    pub fn add_task(
        &mut self,
        payload: Value,
        meta: TaskMeta,
        clock: &impl Clock,
    ) -> Result<TaskId, TaskError> {
        let task = Task::from_value(payload)?;
        let id = TaskId::new();
        let info = TaskInfo {
            state: TaskState::Pending,
            created_ms: clock.epoch_ms(),
            name: meta.name,
            result: None,
        };

        match &info.name {
            Some(name) => info!(beacon = %self.id, task = %id, name = %name, "task queued"),
            None => info!(beacon = %self.id, task = %id, "task queued"),
        }

        self.tasks.insert(id, task);
        self.infos.insert(id, info);
        Ok(id)
    }

    /// Hand every pending task to the beacon, marking each delivered.
    ///
    /// Also bumps `last_seen`. This is a once-only hand-off: a task already
    /// delivered or completed is never returned again, and there is no
    /// re-delivery or timeout — if the agent never reports, the task stays
    /// delivered forever.
    pub fn consume_tasks(&mut self, clock: &impl Clock) -> IndexMap<TaskId, Task> {
        self.last_seen_ms = clock.epoch_ms();

        let mut delivered = IndexMap::new();
        for (task_id, info) in &mut self.infos {
            if info.state != TaskState::Pending {
                continue;
            }
            info.state = TaskState::Delivered;
            if let Some(task) = self.tasks.get(task_id) {
                delivered.insert(*task_id, task.clone());
            }
            match &info.name {
                Some(name) => {
                    info!(beacon = %self.id, task = %task_id, name = %name, "task delivered")
                }
                None => info!(beacon = %self.id, task = %task_id, "task delivered"),
            }
        }
        delivered
    }

    /// Record a result and mark the task completed.
    ///
    /// An unknown task id synthesizes a fresh entry (placeholder payload
    /// plus metadata) instead of failing — a deliberately permissive write,
    /// logged as the potential source of orphaned entries it is.
    pub fn complete_task(&mut self, id: TaskId, result: Value, clock: &impl Clock) {
        if !self.infos.contains_key(&id) {
            warn!(beacon = %self.id, task = %id, "result for unknown task, synthesizing entry");
            self.tasks.insert(id, Task::default());
            self.infos.insert(
                id,
                TaskInfo {
                    state: TaskState::Pending,
                    created_ms: clock.epoch_ms(),
                    name: None,
                    result: None,
                },
            );
        }

        if let Some(info) = self.infos.get_mut(&id) {
            info.state = TaskState::Completed;
            info.result = Some(result);
            match &info.name {
                Some(name) => info!(beacon = %self.id, task = %id, name = %name, "task completed"),
                None => info!(beacon = %self.id, task = %id, "task completed"),
            }
        }
    }

    /// Snapshot read of one task; `None` for an unknown id.
    pub fn get_task(&self, id: &TaskId) -> Option<TaskSnapshot> {
        let info = self.infos.get(id)?;
        let task = self.tasks.get(id)?;
        Some(TaskSnapshot { info: info.clone(), task: task.clone() })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
