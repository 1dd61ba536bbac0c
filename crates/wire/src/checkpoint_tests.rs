// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn active_files_and_notes_are_omitted_when_absent() {
    let input = CheckpointInput {
        role: "developer".to_string(),
        summary: "halfway".to_string(),
        completed_items: vec!["a".to_string()],
        pending_items: vec!["b".to_string()],
        total_count: 2,
        active_files: None,
        notes: None,
    };
    let json = serde_json::to_value(&input).unwrap();
    assert!(json.get("active_files").is_none());
    assert!(json.get("notes").is_none());
}

#[test]
fn output_round_trips_through_json() {
    let output = CheckpointOutput { checkpoint_id: "ckp-1".to_string(), percent_complete: 50.0 };
    let json = serde_json::to_string(&output).unwrap();
    let back: CheckpointOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back, output);
}
