// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shutdown specs.

use crate::specs::prelude::*;

#[tokio::test]
async fn stop_endpoint_tears_the_whole_server_down() {
    let ts = start_server().await;

    let resp = post_json(&ts.control_url("/stop"), &json!({})).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Stop request sent");

    tokio::time::timeout(SPEC_WAIT, ts.server.wait()).await.unwrap();

    // both planes are gone
    assert!(reqwest::get(format!("http://{}/beacon", ts.control)).await.is_err());
    assert!(reqwest::get(format!("http://{}/", ts.external)).await.is_err());
}
