// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

fn engine() -> (tempfile::TempDir, CheckpointEngine) {
    let dir = tempdir().unwrap();
    let store = Arc::new(StateStore::open(dir.path()).unwrap());
    (dir, CheckpointEngine::new(store))
}

#[test]
fn a_role_with_no_checkpoint_yields_the_sentinel() {
    let (_dir, engine) = engine();
    let doc = engine.resume_document(&Role::from("developer"));
    assert_eq!(doc, no_checkpoint_sentinel());
}

#[test]
fn storing_a_checkpoint_makes_it_the_latest() {
    let (_dir, engine) = engine();
    let role = Role::from("developer");
    let checkpoint = Checkpoint::new(
        role.clone(),
        10,
        "schema done",
        vec!["schema.sql".to_string()],
        vec!["migration".to_string()],
        vec![],
        None,
        2,
    )
    .unwrap();

    engine.store(checkpoint.clone()).unwrap();

    assert_eq!(engine.latest(&role), Some(checkpoint.clone()));
    assert!(engine.resume_document(&role).contains("schema done"));
}

#[test]
fn the_second_checkpoint_for_a_role_supersedes_the_first() {
    let (_dir, engine) = engine();
    let role = Role::from("developer");
    let first = Checkpoint::new(
        role.clone(),
        10,
        "first pass",
        vec![],
        vec!["all of it".to_string()],
        vec![],
        None,
        1,
    )
    .unwrap();
    let second = Checkpoint::new(
        role.clone(),
        20,
        "second pass",
        vec!["all of it".to_string()],
        vec![],
        vec![],
        None,
        1,
    )
    .unwrap();

    engine.store(first).unwrap();
    engine.store(second.clone()).unwrap();

    assert_eq!(engine.latest(&role), Some(second));
}
