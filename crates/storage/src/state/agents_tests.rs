// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use apmas_core::Role;

fn role(name: &str) -> Role {
    Role::from(name)
}

#[test]
fn register_creates_pending_agent_once() {
    let mut state = MaterializedState::default();
    let event = StateEvent::AgentRegistered {
        role: role("developer"),
        worker_kind: "claude-code".to_string(),
        dependencies: vec![role("architect")],
    };

    apply(&mut state, &event);
    apply(&mut state, &event);

    assert_eq!(state.agents.len(), 1);
    let agent = state.agents.get(&role("developer")).unwrap();
    assert_eq!(agent.status, AgentStatus::Pending);
    assert_eq!(agent.dependencies, vec![role("architect")]);
}

#[test]
fn status_changed_is_idempotent() {
    let mut state = MaterializedState::default();
    apply(
        &mut state,
        &StateEvent::AgentRegistered {
            role: role("developer"),
            worker_kind: "claude-code".to_string(),
            dependencies: vec![],
        },
    );
    let event = StateEvent::AgentStatusChanged {
        role: role("developer"),
        status: AgentStatus::Running,
        at_ms: 10,
    };

    apply(&mut state, &event);
    apply(&mut state, &event);

    assert_eq!(
        state.agents.get(&role("developer")).unwrap().status,
        AgentStatus::Running
    );
}

#[test]
fn artifacts_merge_is_monotonic() {
    let mut state = MaterializedState::default();
    apply(
        &mut state,
        &StateEvent::AgentRegistered {
            role: role("developer"),
            worker_kind: "claude-code".to_string(),
            dependencies: vec![],
        },
    );
    apply(
        &mut state,
        &StateEvent::AgentArtifactsMerged {
            role: role("developer"),
            artifacts: vec!["src/lib.rs".to_string()],
        },
    );
    apply(
        &mut state,
        &StateEvent::AgentArtifactsMerged {
            role: role("developer"),
            artifacts: vec!["src/lib.rs".to_string(), "src/main.rs".to_string()],
        },
    );

    let agent = state.agents.get(&role("developer")).unwrap();
    assert_eq!(agent.artifacts.len(), 2);
}

#[test]
fn completed_sets_status_and_timestamp() {
    let mut state = MaterializedState::default();
    apply(
        &mut state,
        &StateEvent::AgentRegistered {
            role: role("developer"),
            worker_kind: "claude-code".to_string(),
            dependencies: vec![],
        },
    );
    apply(
        &mut state,
        &StateEvent::AgentCompleted {
            role: role("developer"),
            at_ms: 99,
        },
    );

    let agent = state.agents.get(&role("developer")).unwrap();
    assert_eq!(agent.status, AgentStatus::Completed);
    assert_eq!(agent.completed_at_ms, Some(99));
}

#[test]
fn events_for_unregistered_role_are_ignored() {
    let mut state = MaterializedState::default();
    apply(
        &mut state,
        &StateEvent::AgentCompleted {
            role: role("ghost"),
            at_ms: 1,
        },
    );
    assert!(state.agents.is_empty());
}
