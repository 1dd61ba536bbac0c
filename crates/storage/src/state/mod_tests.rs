// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use apmas_core::{MessageType, ProjectPhase, Role, ToRole};
use std::path::PathBuf;

#[test]
fn replaying_a_full_lifecycle_produces_the_expected_projection() {
    let mut state = MaterializedState::default();
    let role = Role::from("developer");

    state.apply_event(&StateEvent::ProjectInitialized {
        name: "demo".to_string(),
        working_directory: PathBuf::from("/work/demo"),
        at_ms: 0,
    });
    state.apply_event(&StateEvent::AgentRegistered {
        role: role.clone(),
        worker_kind: "claude-code".to_string(),
        dependencies: vec![],
    });
    state.apply_event(&StateEvent::AgentStatusChanged {
        role: role.clone(),
        status: AgentStatus::Queued,
        at_ms: 1,
    });
    state.apply_event(&StateEvent::AgentSpawned {
        role: role.clone(),
        at_ms: 2,
        timeout_at_ms: 602,
    });
    state.apply_event(&StateEvent::MessageAppended {
        message: AgentMessage::new(
            3,
            role.clone(),
            ToRole::Broadcast,
            MessageType::Progress,
            "halfway done",
            None,
            None,
        ),
    });
    state.apply_event(&StateEvent::AgentCompleted {
        role: role.clone(),
        at_ms: 4,
    });
    state.apply_event(&StateEvent::ProjectPhaseChanged {
        phase: ProjectPhase::Completed,
        at_ms: 5,
    });

    assert_eq!(state.project.as_ref().unwrap().phase, ProjectPhase::Completed);
    let agent = state.agents.get(&role).unwrap();
    assert_eq!(agent.status, AgentStatus::Completed);
    assert_eq!(agent.spawned_at_ms, Some(2));
    assert_eq!(state.messages.len(), 1);
    assert!(state.messages_for(&role).next().is_some());
}

#[test]
fn replaying_twice_is_idempotent() {
    let events = vec![
        StateEvent::AgentRegistered {
            role: Role::from("reviewer"),
            worker_kind: "claude-code".to_string(),
            dependencies: vec![],
        },
        StateEvent::AgentArtifactsMerged {
            role: Role::from("reviewer"),
            artifacts: vec!["review.md".to_string()],
        },
    ];

    let mut once = MaterializedState::default();
    for event in &events {
        once.apply_event(event);
    }

    let mut twice = MaterializedState::default();
    for event in events.iter().chain(events.iter()) {
        twice.apply_event(event);
    }

    assert_eq!(
        once.agents.get(&Role::from("reviewer")).unwrap().artifacts,
        twice.agents.get(&Role::from("reviewer")).unwrap().artifacts
    );
}
