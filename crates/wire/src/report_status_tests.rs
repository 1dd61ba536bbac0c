// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    working = { WorkerStatus::Working, "\"working\"" },
    done = { WorkerStatus::Done, "\"done\"" },
    blocked = { WorkerStatus::Blocked, "\"blocked\"" },
    needs_review = { WorkerStatus::NeedsReview, "\"needs_review\"" },
    context_limit = { WorkerStatus::ContextLimit, "\"context_limit\"" },
)]
fn status_serializes_to_the_exact_wire_token(status: WorkerStatus, expected: &str) {
    assert_eq!(serde_json::to_string(&status).unwrap(), expected);
}

#[test]
fn blocked_reason_is_omitted_when_absent() {
    let input = ReportStatusInput {
        role: "reviewer".to_string(),
        status: WorkerStatus::Working,
        message: "on it".to_string(),
        artifacts: None,
        blocked_reason: None,
    };
    let json = serde_json::to_value(&input).unwrap();
    assert!(json.get("blocked_reason").is_none());
}
