// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing control plane.
//!
//! Plain JSON throughout; only the external plane is codec-framed. The
//! update endpoint maps per-task validation failures to `null` markers in
//! its positional response rather than failing the batch.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use roost_core::{BeaconId, TaskId, TaskMeta};

use crate::lifecycle::ServerCtx;
use crate::listeners::{AddOutcome, ListenerSet, RemoveOutcome};

/// Control-plane handler state: the shared context plus the listener set,
/// which the server owns separately from the context.
#[derive(Clone)]
pub struct ControlCtx {
    pub ctx: Arc<ServerCtx>,
    pub listeners: Arc<ListenerSet>,
}

pub fn router(ctx: Arc<ServerCtx>, listeners: Arc<ListenerSet>) -> Router {
    Router::new()
        .route("/listener", get(list_listeners))
        .route("/listener/add", post(add_listener))
        .route("/listener/del", post(del_listener))
        .route("/beacon", get(list_beacons))
        .route("/beacon/update/:beacon", post(update_beacon))
        .route("/beacon/task/:beacon/:task", get(get_beacon_task))
        .route("/stop", post(stop))
        .with_state(ControlCtx { ctx, listeners })
}

#[derive(Debug, Serialize)]
struct Msg {
    msg: String,
}

fn msg(text: impl Into<String>) -> Json<Msg> {
    Json(Msg { msg: text.into() })
}

/// Listener address in an add/del request. Both fields default to the
/// standard external bind.
#[derive(Debug, Deserialize)]
pub struct ListenerSpec {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8888
}

/// One entry in an update batch: the payload to queue plus optional
/// operator metadata.
#[derive(Debug, Deserialize)]
pub struct TaskEntry {
    #[serde(default)]
    pub task: Value,
    #[serde(default)]
    pub info: Option<TaskMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

/// Positional per-entry outcomes: a task id, or `null` where the entry
/// was rejected.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub msg: String,
    pub tasks: Vec<Option<TaskId>>,
}

async fn list_listeners(State(state): State<ControlCtx>) -> Json<Vec<String>> {
    Json(state.listeners.addrs().await)
}

async fn add_listener(
    State(state): State<ControlCtx>,
    Json(spec): Json<ListenerSpec>,
) -> Response {
    match state.listeners.add(&spec.host, spec.port).await {
        Ok(AddOutcome::Added(_)) => {
            msg(format!("New listener {}:{}", spec.host, spec.port)).into_response()
        }
        Ok(AddOutcome::AlreadyListening) => msg("Already listening").into_response(),
        Err(err) => {
            warn!(host = %spec.host, port = spec.port, "listener add failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, msg(err.to_string())).into_response()
        }
    }
}

async fn del_listener(
    State(state): State<ControlCtx>,
    Json(spec): Json<ListenerSpec>,
) -> Response {
    match state.listeners.remove(&spec.host, spec.port).await {
        RemoveOutcome::Removed => {
            msg(format!("Removed listener {}:{}", spec.host, spec.port)).into_response()
        }
        // no-op, not an error: deleting an absent listener still succeeds
        RemoveOutcome::NotFound => msg("No active listener found").into_response(),
    }
}

async fn list_beacons(State(state): State<ControlCtx>) -> Json<Vec<BeaconId>> {
    Json(state.ctx.registry.ids())
}

/// Queue a batch of tasks for a beacon, creating its session if unseen.
async fn update_beacon(
    State(state): State<ControlCtx>,
    Path(beacon): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> Response {
    let Ok(id) = BeaconId::parse(&beacon) else {
        return (StatusCode::BAD_REQUEST, msg("Invalid beacon id")).into_response();
    };
    let ctx = &state.ctx;
    let session = ctx.registry.get_or_create(id, &ctx.clock);
    let mut session = session.lock();
    let task_ids: Vec<Option<TaskId>> = req
        .tasks
        .into_iter()
        .map(|entry| {
            session.add_task(entry.task, entry.info.unwrap_or_default(), &ctx.clock).ok()
        })
        .collect();
    Json(UpdateResponse { msg: "Updated".into(), tasks: task_ids }).into_response()
}

/// Inspect one task. An unparsable task id reads as unknown, not invalid.
async fn get_beacon_task(
    State(state): State<ControlCtx>,
    Path((beacon, task)): Path<(String, String)>,
) -> Response {
    let Ok(id) = BeaconId::parse(&beacon) else {
        return (StatusCode::BAD_REQUEST, msg("Invalid beacon id")).into_response();
    };
    let Ok(task_id) = TaskId::parse(&task) else {
        return (StatusCode::NOT_FOUND, msg("No such task")).into_response();
    };
    let ctx = &state.ctx;
    let session = ctx.registry.get_or_create(id, &ctx.clock);
    let snapshot = session.lock().get_task(&task_id);
    match snapshot {
        Some(snapshot) => Json(snapshot).into_response(),
        None => (StatusCode::NOT_FOUND, msg("No such task")).into_response(),
    }
}

async fn stop(State(state): State<ControlCtx>) -> Json<Msg> {
    info!("stop requested");
    state.ctx.shutdown.cancel();
    Json(Msg { msg: "Stop request sent".into() })
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
