// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full task lifecycle specs: operator to agent and back.

use std::sync::Arc;

use crate::specs::prelude::*;

#[tokio::test]
async fn operator_task_flows_through_an_agent_to_completion() {
    let ts = start_server().await;

    let boot = Beacon::fetch_bootstrap(&ts.external_base()).await.unwrap();
    let beacon = Arc::new(Beacon::new(
        ts.external_base(),
        boot.beacon,
        Duration::from_secs(60),
    ));

    // operator queues a shell task
    let resp = post_json(
        &ts.control_url(&format!("/beacon/update/{}", boot.beacon)),
        &json!({"tasks": [{"task": {"action": "shell", "cmd": "echo hi"}, "info": {"name": "greet"}}]}),
    )
    .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Updated");
    let task_id = body["tasks"][0].as_str().unwrap().to_string();

    // first poll picks it up and marks it delivered server-side
    beacon.sync().await.unwrap();
    let snapshot =
        get_json(&ts.control_url(&format!("/beacon/task/{}/{task_id}", boot.beacon))).await;
    assert_eq!(snapshot["info"]["state"], "delivered");
    assert_eq!(snapshot["info"]["name"], "greet");

    // the worker finishes; the next poll reports the result
    wait_until(|| !beacon.results().is_empty()).await;
    beacon.sync().await.unwrap();

    let snapshot =
        get_json(&ts.control_url(&format!("/beacon/task/{}/{task_id}", boot.beacon))).await;
    assert_eq!(snapshot["info"]["state"], "completed");
    assert_eq!(snapshot["info"]["result"]["stdout"], "hi\n");
    assert_eq!(snapshot["info"]["result"]["returncode"], 0);
    assert!(beacon.results().is_empty());
}

#[tokio::test]
async fn delivered_task_is_never_handed_out_twice() {
    let ts = start_server().await;
    let id = BeaconId::new();

    post_json(
        &ts.control_url(&format!("/beacon/update/{id}")),
        &json!({"tasks": [{"task": {"action": "shell", "cmd": "id"}}]}),
    )
    .await;

    let client = reqwest::Client::new();
    let first = client.post(ts.external_url(&format!("/{id}"))).body("").send().await.unwrap();
    let reply: SyncReply =
        serde_json::from_value(codec::decode(&first.text().await.unwrap()).unwrap()).unwrap();
    assert_eq!(reply.tasks.len(), 1);

    let second = client.post(ts.external_url(&format!("/{id}"))).body("").send().await.unwrap();
    let reply: SyncReply =
        serde_json::from_value(codec::decode(&second.text().await.unwrap()).unwrap()).unwrap();
    assert!(reply.tasks.is_empty());
}

#[tokio::test]
async fn stop_task_halts_a_running_agent() {
    let ts = start_server().await;
    let id = BeaconId::new();

    post_json(
        &ts.control_url(&format!("/beacon/update/{id}")),
        &json!({"tasks": [{"task": {"action": "stop"}, "info": {"name": "wind-down"}}]}),
    )
    .await;

    let beacon = Arc::new(Beacon::new(ts.external_base(), id, Duration::from_millis(50)));
    let stop = beacon.stop_token();
    let runner = tokio::spawn(Arc::clone(&beacon).run());

    tokio::time::timeout(SPEC_WAIT, stop.cancelled()).await.unwrap();
    tokio::time::timeout(SPEC_WAIT, runner).await.unwrap().unwrap();
}
