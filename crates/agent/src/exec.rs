// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task execution bodies.

use serde_json::{json, Value};
use tokio::process::Command;

use roost_core::Clock;

/// Run a shell command and capture its output as a result object.
///
/// Spawn failures become a result too (stderr text, return code -1); the
/// server always hears back about a shell task that was dispatched.
pub async fn shell(cmd: &str, clock: &impl Clock) -> Value {
    match Command::new("sh").arg("-c").arg(cmd).output().await {
        Ok(out) => json!({
            "stdout": String::from_utf8_lossy(&out.stdout),
            "stderr": String::from_utf8_lossy(&out.stderr),
            "returncode": out.status.code().unwrap_or(-1),
            "completed": clock.epoch_ms(),
        }),
        Err(err) => json!({
            "stdout": "",
            "stderr": err.to_string(),
            "returncode": -1,
            "completed": clock.epoch_ms(),
        }),
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
