// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use apmas_core::{AgentStatus, Role};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn commit_is_immediately_visible() {
    let dir = tempdir().unwrap();
    let store = StateStore::open(dir.path()).unwrap();

    store
        .commit(StateEvent::ProjectInitialized {
            name: "demo".to_string(),
            working_directory: PathBuf::from("/work/demo"),
            at_ms: 0,
        })
        .unwrap();
    store
        .commit(StateEvent::AgentRegistered {
            role: Role::from("developer"),
            worker_kind: "claude-code".to_string(),
            dependencies: vec![],
        })
        .unwrap();

    assert_eq!(store.project().unwrap().name, "demo");
    assert_eq!(
        store.agent(&Role::from("developer")).unwrap().status,
        AgentStatus::Pending
    );
}

#[test]
fn reopening_replays_prior_commits() {
    let dir = tempdir().unwrap();
    {
        let store = StateStore::open(dir.path()).unwrap();
        store
            .commit(StateEvent::AgentRegistered {
                role: Role::from("developer"),
                worker_kind: "claude-code".to_string(),
                dependencies: vec![],
            })
            .unwrap();
        store
            .commit(StateEvent::AgentStatusChanged {
                role: Role::from("developer"),
                status: AgentStatus::Queued,
                at_ms: 1,
            })
            .unwrap();
    }

    let store = StateStore::open(dir.path()).unwrap();
    assert_eq!(
        store.agent(&Role::from("developer")).unwrap().status,
        AgentStatus::Queued
    );
}

#[test]
fn sequence_numbers_are_monotonic() {
    let dir = tempdir().unwrap();
    let store = StateStore::open(dir.path()).unwrap();

    let seq1 = store
        .commit(StateEvent::AgentRegistered {
            role: Role::from("developer"),
            worker_kind: "claude-code".to_string(),
            dependencies: vec![],
        })
        .unwrap();
    let seq2 = store
        .commit(StateEvent::AgentStatusChanged {
            role: Role::from("developer"),
            status: AgentStatus::Queued,
            at_ms: 1,
        })
        .unwrap();

    assert_eq!(seq1, 1);
    assert_eq!(seq2, 2);
}
