// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use apmas_core::{Checkpoint, StateEvent};
use apmas_storage::StateStore;

use super::*;

fn seeded_store(dir: &tempfile::TempDir) -> StateStore {
    let store = StateStore::open(dir.path()).unwrap();
    store
        .commit(StateEvent::ProjectInitialized { name: "demo".to_string(), working_directory: dir.path().to_path_buf(), at_ms: 1 })
        .unwrap();
    store
        .commit(StateEvent::AgentRegistered { role: apmas_core::Role::from("architect"), worker_kind: "agent".to_string(), dependencies: vec![] })
        .unwrap();
    let checkpoint = Checkpoint::new(
        apmas_core::Role::from("architect"),
        2,
        "halfway",
        vec!["design.md".to_string()],
        vec!["tests.md".to_string()],
        vec![],
        None,
        2,
    )
    .unwrap();
    store.commit(StateEvent::CheckpointStored { checkpoint }).unwrap();
    store
}

#[test]
fn checkpoint_reports_latest() {
    let dir = tempfile::tempdir().unwrap();
    seeded_store(&dir);

    handle(&dir.path().to_path_buf(), "architect", OutputFormat::Text).unwrap();
}

#[test]
fn checkpoint_reports_sentinel_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    StateStore::open(dir.path()).unwrap();

    handle(&dir.path().to_path_buf(), "ghost", OutputFormat::Text).unwrap();
}
