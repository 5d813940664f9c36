// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task payload model and lifecycle metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// State of a task in its server-side lifecycle.
///
/// Transitions are monotonic: pending → delivered → completed. There is no
/// regression and no server-side cancellation; a task id, once created, is
/// retained for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Queued, not yet handed to the beacon
    Pending,
    /// Handed out exactly once; there is no re-delivery or timeout
    Delivered,
    /// Result received
    Completed,
}

crate::simple_display! {
    TaskState {
        Pending => "pending",
        Delivered => "delivered",
        Completed => "completed",
    }
}

/// Errors from task validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task payload must be a JSON object")]
    NotAnObject,
}

/// A task payload, stored verbatim as received from the operator.
///
/// The server never interprets payload content; only the agent classifies
/// it (see [`Task::kind`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task(pub Map<String, Value>);

/// Known task kinds, classified from the payload's `action` field.
///
/// Unrecognized payloads stay available verbatim through the owning
/// [`Task`]; an agent skips kinds it does not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind<'a> {
    /// Run a shell command on the agent host
    Shell { cmd: &'a str },
    /// Ask the agent to stop polling and exit
    Stop,
    /// Anything else, preserved for forward compatibility
    Unknown,
}

impl Task {
    /// Validate an operator-supplied payload. Anything but a JSON object
    /// is rejected.
    pub fn from_value(value: Value) -> Result<Self, TaskError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(TaskError::NotAnObject),
        }
    }

    /// Payload for a shell-command task.
    pub fn shell(cmd: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("action".into(), Value::String("shell".into()));
        map.insert("cmd".into(), Value::String(cmd.into()));
        Self(map)
    }

    /// Payload for a stop task.
    pub fn stop() -> Self {
        let mut map = Map::new();
        map.insert("action".into(), Value::String("stop".into()));
        Self(map)
    }

    /// Classify the payload for dispatch.
    pub fn kind(&self) -> TaskKind<'_> {
        match self.0.get("action").and_then(Value::as_str) {
            Some("shell") => match self.0.get("cmd").and_then(Value::as_str) {
                Some(cmd) => TaskKind::Shell { cmd },
                None => TaskKind::Unknown,
            },
            Some("stop") => TaskKind::Stop,
            _ => TaskKind::Unknown,
        }
    }
}

/// Operator-supplied metadata attached at task creation.
///
/// Deliberately narrow: `state`, `created`, and `result` are server-owned
/// and cannot be set from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Server-side record for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub state: TaskState,
    /// Epoch milliseconds at creation
    #[serde(rename = "created")]
    pub created_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Snapshot of a task and its metadata, as returned by task inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub info: TaskInfo,
    pub task: Task,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
