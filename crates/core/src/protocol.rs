// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync protocol DTOs shared by server and agent.
//!
//! Every body on the external plane is one of these, framed through
//! [`codec`](crate::codec). Order-preserving maps keep delivery order
//! deterministic end to end.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::{BeaconId, TaskId};
use crate::task::Task;

/// Results reported by an agent in one poll.
///
/// Serializes to `{}` when empty (the agent sends an empty body instead,
/// but a decoded empty object deserializes back to this default).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncUpdate {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub results: IndexMap<TaskId, Value>,
}

/// Tasks handed to an agent in one poll response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncReply {
    #[serde(default)]
    pub tasks: IndexMap<TaskId, Task>,
}

/// Bootstrap document served to a fresh agent, with its session id embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bootstrap {
    pub beacon: BeaconId,
    pub interval_secs: u64,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
