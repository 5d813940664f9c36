// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime-managed external listeners.
//!
//! Operators open and close agent-facing sockets while the server runs.
//! Every listener serves a clone of the same installed route table, so an
//! agent can sync through any of them interchangeably. Listeners are keyed
//! by the requested `host:port` string, which makes add and remove
//! idempotent per requested address.

use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ListenerError {
    /// [`ListenerSet::install`] has not run yet.
    #[error("no agent route table installed")]
    NotInstalled,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// Bound and serving; carries the resolved local address.
    Added(SocketAddr),
    /// A listener under this key is already active.
    AlreadyListening,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

struct ListenerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

#[derive(Default)]
pub struct ListenerSet {
    // Installed after router construction; the router needs the shared ctx,
    // which owns this set.
    router: parking_lot::Mutex<Option<Router>>,
    // tokio Mutex: the insertion critical section spans the bind await, so
    // two racing adds for one key cannot both bind.
    active: tokio::sync::Mutex<HashMap<String, ListenerHandle>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the route table every future listener will serve.
    pub fn install(&self, router: Router) {
        *self.router.lock() = Some(router);
    }

    /// Bind a new listener on `host:port` and start serving.
    pub async fn add(&self, host: &str, port: u16) -> Result<AddOutcome, ListenerError> {
        let router = self.router.lock().clone().ok_or(ListenerError::NotInstalled)?;
        let key = format!("{host}:{port}");

        let mut active = self.active.lock().await;
        if active.contains_key(&key) {
            debug!(addr = %key, "listener already active");
            return Ok(AddOutcome::AlreadyListening);
        }

        let listener = TcpListener::bind((host, port)).await.map_err(|source| {
            ListenerError::Bind { addr: key.clone(), source }
        })?;
        let local = listener.local_addr().map_err(|source| ListenerError::Bind {
            addr: key.clone(),
            source,
        })?;

        let cancel = CancellationToken::new();
        let stop = cancel.clone();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(stop.cancelled_owned());
            if let Err(err) = serve.await {
                error!(addr = %local, "listener failed: {err}");
            }
        });
        active.insert(key.clone(), ListenerHandle { cancel, task });
        info!(addr = %key, local = %local, "new listener");
        Ok(AddOutcome::Added(local))
    }

    /// Stop the listener keyed `host:port` and wait for it to wind down.
    pub async fn remove(&self, host: &str, port: u16) -> RemoveOutcome {
        let key = format!("{host}:{port}");
        let handle = self.active.lock().await.remove(&key);
        match handle {
            None => RemoveOutcome::NotFound,
            Some(handle) => {
                handle.cancel.cancel();
                let _ = handle.task.await;
                info!(addr = %key, "removed listener");
                RemoveOutcome::Removed
            }
        }
    }

    /// Keys of every active listener, sorted.
    pub async fn addrs(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.active.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn count(&self) -> usize {
        self.active.lock().await.len()
    }

    /// Stop every listener; used during server teardown.
    pub async fn shutdown_all(&self) {
        let drained: Vec<_> = self.active.lock().await.drain().collect();
        for (key, handle) in drained {
            handle.cancel.cancel();
            let _ = handle.task.await;
            info!(addr = %key, "listener stopped");
        }
    }
}

#[cfg(test)]
#[path = "listeners_tests.rs"]
mod tests;
