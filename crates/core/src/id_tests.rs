// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_ids_are_distinct() {
    let a = BeaconId::new();
    let b = BeaconId::new();
    assert_ne!(a, b);
}

#[test]
fn display_is_simple_hex() {
    let id = TaskId::new();
    let s = id.to_string();
    assert_eq!(s.len(), 32);
    assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn parse_accepts_simple_and_hyphenated() {
    let id = BeaconId::new();
    let simple = id.to_string();
    assert_eq!(BeaconId::parse(&simple).unwrap(), id);

    // Re-render with hyphens and parse that too
    let hyphenated = uuid::Uuid::parse_str(&simple).unwrap().hyphenated().to_string();
    assert_eq!(BeaconId::parse(&hyphenated).unwrap(), id);
}

#[test]
fn parse_rejects_garbage() {
    let err = TaskId::parse("not-an-id").unwrap_err();
    assert!(err.to_string().contains("TaskId"));
}

#[test]
fn serde_roundtrip_as_string() {
    let id = TaskId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id));

    let back: TaskId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn ids_work_as_json_map_keys() {
    let id = TaskId::new();
    let mut map = indexmap::IndexMap::new();
    map.insert(id, 1u32);

    let json = serde_json::to_string(&map).unwrap();
    let back: indexmap::IndexMap<TaskId, u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.get(&id), Some(&1));
}
