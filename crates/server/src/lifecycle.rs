// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server lifecycle: bring-up, shared context, and graceful teardown.

use roost_core::{BeaconRegistry, SystemClock};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::control;
use crate::external;
use crate::listeners::{ListenerError, ListenerSet};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to bind control plane {addr}: {source}")]
    ControlBind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Server configuration, resolved before bring-up.
#[derive(Debug, Clone)]
pub struct Config {
    /// Operator API bind address. Loopback by default.
    pub control_addr: SocketAddr,
    /// Initial external listener, if any. More can be added at runtime.
    pub listen_addr: Option<SocketAddr>,
    /// Poll interval advertised to bootstrapping agents.
    pub interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control_addr: SocketAddr::from(([127, 0, 0, 15], 7641)),
            listen_addr: Some(SocketAddr::from(([0, 0, 0, 0], 8888))),
            interval_secs: 3,
        }
    }
}

/// Shared state behind every handler on both planes.
///
/// Deliberately does not own the [`ListenerSet`]: the set holds the
/// external router, which holds this context, so owning it here would
/// make the context immortal.
pub struct ServerCtx {
    pub registry: BeaconRegistry,
    pub shutdown: CancellationToken,
    pub clock: SystemClock,
    pub interval_secs: u64,
}

impl ServerCtx {
    pub fn new(interval_secs: u64) -> Arc<Self> {
        Arc::new(Self {
            registry: BeaconRegistry::new(),
            shutdown: CancellationToken::new(),
            clock: SystemClock,
            interval_secs,
        })
    }
}

/// A running server. Dropping it does not stop anything; call
/// [`Server::wait`] to block until shutdown and tear down cleanly.
pub struct Server {
    ctx: Arc<ServerCtx>,
    listeners: Arc<ListenerSet>,
    control_addr: SocketAddr,
    control_task: JoinHandle<()>,
}

impl Server {
    pub async fn start(config: Config) -> Result<Self, LifecycleError> {
        let ctx = ServerCtx::new(config.interval_secs);
        let listeners = Arc::new(ListenerSet::new());
        listeners.install(external::router(Arc::clone(&ctx)));

        let listener = TcpListener::bind(config.control_addr).await.map_err(|source| {
            LifecycleError::ControlBind { addr: config.control_addr, source }
        })?;
        let control_addr = listener.local_addr()?;
        let router = control::router(Arc::clone(&ctx), Arc::clone(&listeners));
        let stop = ctx.shutdown.clone();
        let control_task = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(stop.cancelled_owned());
            if let Err(err) = serve.await {
                error!("control plane failed: {err}");
            }
        });
        info!(addr = %control_addr, "control plane listening");

        if let Some(addr) = config.listen_addr {
            listeners.add(&addr.ip().to_string(), addr.port()).await?;
        }

        Ok(Self { ctx, listeners, control_addr, control_task })
    }

    pub fn ctx(&self) -> &Arc<ServerCtx> {
        &self.ctx
    }

    /// Resolved control-plane address (useful when bound to port 0).
    pub fn control_addr(&self) -> SocketAddr {
        self.control_addr
    }

    pub fn listeners(&self) -> &Arc<ListenerSet> {
        &self.listeners
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.ctx.shutdown.clone()
    }

    /// Request shutdown without waiting for it.
    pub fn stop(&self) {
        self.ctx.shutdown.cancel();
    }

    /// Block until shutdown is requested, then stop every listener and the
    /// control plane.
    pub async fn wait(self) {
        self.ctx.shutdown.cancelled().await;
        info!("shutting down");
        self.listeners.shutdown_all().await;
        let _ = self.control_task.await;
        info!("graceful exit");
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
