// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn input_with_no_include_set_omits_the_field() {
    let input = GetContextInput { include: None, role: None, message_limit: None };
    let json = serde_json::to_value(&input).unwrap();
    assert!(json.get("include").is_none());
}

#[test]
fn output_only_serializes_populated_sections() {
    let output = GetContextOutput {
        project: None,
        agents: Some(vec![AgentSnapshot {
            role: "architect".to_string(),
            status: "running".to_string(),
            retry_count: 0,
            last_message: None,
            last_error: None,
        }]),
        messages: None,
        artifacts: None,
    };
    let json = serde_json::to_value(&output).unwrap();
    assert!(json.get("project").is_none());
    assert!(json.get("messages").is_none());
    assert!(json.get("agents").is_some());
}
