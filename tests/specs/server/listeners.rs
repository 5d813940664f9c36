// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener management specs over the control plane.

use crate::specs::prelude::*;

#[tokio::test]
async fn listener_add_list_del_roundtrip() {
    let ts = start_server().await;
    let spec = json!({"host": "127.0.0.1", "port": 0});

    let listed = get_json(&ts.control_url("/listener")).await;
    assert_eq!(listed, json!(["127.0.0.1:0"]));

    let resp = post_json(&ts.control_url("/listener/add"), &spec).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Already listening");

    let resp = post_json(&ts.control_url("/listener/del"), &spec).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Removed listener 127.0.0.1:0");
    assert_eq!(get_json(&ts.control_url("/listener")).await, json!([]));

    // absent key: no-op success, same shape as the other outcomes
    let resp = post_json(&ts.control_url("/listener/del"), &spec).await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "No active listener found");
}

#[tokio::test]
async fn every_listener_serves_the_same_registry() {
    let ts = start_server().await;

    let AddOutcome::Added(second) =
        ts.server.listeners().add("0.0.0.0", 0).await.unwrap()
    else {
        panic!("second listener failed to bind");
    };

    // one session through each listener, one registry behind both
    let a = Beacon::fetch_bootstrap(&ts.external_base()).await.unwrap();
    let b = Beacon::fetch_bootstrap(&format!("http://127.0.0.1:{}", second.port()))
        .await
        .unwrap();
    assert_ne!(a.beacon, b.beacon);

    let beacons = get_json(&ts.control_url("/beacon")).await;
    let listed = beacons.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&json!(a.beacon.to_string())));
    assert!(listed.contains(&json!(b.beacon.to_string())));
}
