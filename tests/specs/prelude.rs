// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the end-to-end specs.

use std::net::SocketAddr;

pub use serde_json::{json, Value};
pub use std::time::Duration;

pub use roost_agent::Beacon;
pub use roost_core::{codec, BeaconId, Bootstrap, SyncReply};
pub use roost_server::{AddOutcome, Config, Server};

pub const SPEC_WAIT: Duration = Duration::from_secs(5);

/// A server under test: control plane plus one agent-facing listener, both
/// on ephemeral loopback ports.
pub struct TestServer {
    pub server: Server,
    pub control: SocketAddr,
    pub external: SocketAddr,
}

pub async fn start_server() -> TestServer {
    let config = Config {
        control_addr: "127.0.0.1:0".parse().unwrap(),
        listen_addr: None,
        interval_secs: 1,
    };
    let server = Server::start(config).await.unwrap();
    let control = server.control_addr();
    let AddOutcome::Added(external) = server.listeners().add("127.0.0.1", 0).await.unwrap()
    else {
        panic!("external listener failed to bind");
    };
    TestServer { server, control, external }
}

impl TestServer {
    pub fn control_url(&self, path: &str) -> String {
        format!("http://{}{}", self.control, path)
    }

    pub fn external_url(&self, path: &str) -> String {
        format!("http://{}{}", self.external, path)
    }

    /// Server origin an agent would be pointed at.
    pub fn external_base(&self) -> String {
        format!("http://{}", self.external)
    }
}

pub async fn post_json(url: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new().post(url).json(body).send().await.unwrap()
}

pub async fn get_json(url: &str) -> Value {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

/// Poll until `condition` holds or [`SPEC_WAIT`] elapses.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + SPEC_WAIT;
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition not reached in time");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
