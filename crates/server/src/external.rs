// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent-facing routes: bootstrap and the sync exchange.
//!
//! Everything on this plane is framed through the wire codec. The sync
//! handler is deliberately forgiving: an undecodable body degrades to an
//! empty update rather than failing the exchange, so a confused agent
//! still receives its queued tasks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::{debug, error};

use roost_core::{codec, BeaconId, Bootstrap, SyncReply, SyncUpdate};

use crate::lifecycle::ServerCtx;

pub fn router(ctx: Arc<ServerCtx>) -> Router {
    Router::new()
        .route("/", get(bootstrap))
        .route("/:beacon", post(sync))
        .with_state(ctx)
}

/// Serve a bootstrap document under a freshly registered session id.
async fn bootstrap(State(ctx): State<Arc<ServerCtx>>) -> Response {
    let (id, _session) = ctx.registry.create_new(&ctx.clock);
    let doc = Bootstrap { beacon: id, interval_secs: ctx.interval_secs };
    match codec::encode(&doc) {
        Ok(token) => token.into_response(),
        Err(err) => {
            error!(beacon = %id, "bootstrap encode failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// One poll: absorb reported results, hand over pending tasks.
async fn sync(
    State(ctx): State<Arc<ServerCtx>>,
    Path(beacon): Path<String>,
    body: String,
) -> Response {
    let Ok(id) = BeaconId::parse(&beacon) else {
        debug!(%beacon, "sync under unparsable beacon id");
        return StatusCode::BAD_REQUEST.into_response();
    };
    let session = ctx.registry.get_or_create(id, &ctx.clock);

    let update = match codec::decode(&body) {
        Ok(value) => serde_json::from_value::<SyncUpdate>(value).unwrap_or_else(|err| {
            debug!(beacon = %id, "unrecognized sync body: {err}");
            SyncUpdate::default()
        }),
        Err(err) => {
            debug!(beacon = %id, "undecodable sync body: {err}");
            SyncUpdate::default()
        }
    };

    // One lock span: completions land before the same poll's hand-off.
    let reply = {
        let mut session = session.lock();
        for (task_id, result) in update.results {
            session.complete_task(task_id, result, &ctx.clock);
        }
        SyncReply { tasks: session.consume_tasks(&ctx.clock) }
    };

    match codec::encode(&reply) {
        Ok(token) => token.into_response(),
        Err(err) => {
            error!(beacon = %id, "sync encode failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[path = "external_tests.rs"]
mod tests;
