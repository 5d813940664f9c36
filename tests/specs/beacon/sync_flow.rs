// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bootstrap and sync specs over the agent plane.

use crate::specs::prelude::*;

#[tokio::test]
async fn bootstrap_hands_out_a_registered_session() {
    let ts = start_server().await;

    let token = reqwest::get(ts.external_url("/")).await.unwrap().text().await.unwrap();
    let boot: Bootstrap = serde_json::from_value(codec::decode(&token).unwrap()).unwrap();
    assert_eq!(boot.interval_secs, 1);

    let beacons = get_json(&ts.control_url("/beacon")).await;
    assert_eq!(beacons, json!([boot.beacon.to_string()]));
}

#[tokio::test]
async fn unseen_beacon_id_is_adopted_on_first_sync() {
    let ts = start_server().await;
    let id = BeaconId::new();

    // agent-chosen id the server has never issued
    let resp = reqwest::Client::new()
        .post(ts.external_url(&format!("/{id}")))
        .body("")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let reply = codec::decode(&resp.text().await.unwrap()).unwrap();
    assert_eq!(reply, json!({"tasks": {}}));

    let beacons = get_json(&ts.control_url("/beacon")).await;
    assert_eq!(beacons, json!([id.to_string()]));
}

#[tokio::test]
async fn garbage_beacon_id_never_creates_a_session() {
    let ts = start_server().await;

    let resp = reqwest::Client::new()
        .post(ts.external_url("/definitely-not-an-id"))
        .body("")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let beacons = get_json(&ts.control_url("/beacon")).await;
    assert_eq!(beacons, json!([]));
}
