// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Arc;

use apmas_core::{Checkpoint, FakeClock, MessageType, RosterEntry, StateEvent};
use apmas_storage::StateStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::tempdir;

use super::*;
use crate::launcher::fake::FakeLauncher;

fn roster_entry(role: &str, deps: &[&str]) -> RosterEntry {
    RosterEntry {
        role: Role::from(role),
        worker_kind: "claude-code".to_string(),
        dependencies: deps.iter().map(|d| Role::from(*d)).collect(),
        timeout_override_ms: None,
        description: None,
        prompt_kind: None,
    }
}

fn bootstrap_with_dir(roster: &Roster) -> (tempfile::TempDir, Arc<StateStore>) {
    let dir = tempdir().unwrap();
    let store = Arc::new(StateStore::open(dir.path()).unwrap());
    store
        .commit(StateEvent::ProjectInitialized {
            name: "demo".to_string(),
            working_directory: PathBuf::from("/work/demo"),
            at_ms: 0,
        })
        .unwrap();
    for entry in &roster.entries {
        store
            .commit(StateEvent::AgentRegistered {
                role: entry.role.clone(),
                worker_kind: entry.worker_kind.clone(),
                dependencies: entry.dependencies.clone(),
            })
            .unwrap();
    }
    (dir, store)
}

#[derive(Default)]
struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotifySink for Arc<RecordingSink> {
    async fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

fn supervisor_for(
    store: Arc<StateStore>,
    roster: Roster,
    max_retries: u32,
) -> (
    Supervisor<Arc<FakeLauncher>, Arc<RecordingSink>, FakeClock>,
    Arc<FakeLauncher>,
    Arc<RecordingSink>,
    FakeClock,
) {
    let launcher = Arc::new(FakeLauncher::new());
    let sink = Arc::new(RecordingSink::default());
    let clock = FakeClock::new();
    clock.set_epoch_ms(0);
    let mut config = SupervisorConfig::new(300_000, 300_000, max_retries);
    config.spawning_grace_ms = 300_000;
    let supervisor = Supervisor::new(store, roster, config, launcher.clone(), sink.clone(), clock.clone());
    (supervisor, launcher, sink, clock)
}

#[tokio::test]
async fn happy_path_linear_graph_completes_the_project() {
    let roster = Roster::new(vec![roster_entry("a", &[]), roster_entry("b", &["a"])]);
    let (_dir, store) = bootstrap_with_dir(&roster);
    let (mut supervisor, launcher, _sink, _clock) = supervisor_for(store.clone(), roster, 3);

    // Tick 1: A has no deps, is Queued then launched (Pending -> Queued -> Spawning).
    supervisor.tick().await.unwrap();
    assert_eq!(store.agent(&Role::from("a")).unwrap().status, AgentStatus::Spawning);
    assert_eq!(store.agent(&Role::from("b")).unwrap().status, AgentStatus::Pending);
    assert_eq!(launcher.launched.lock().len(), 1);

    // A reports running then completes.
    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Running, at_ms: 1 })
        .unwrap();
    store
        .commit(StateEvent::MessageAppended {
            message: apmas_core::AgentMessage::new(2, Role::from("a"), apmas_core::ToRole::Broadcast, MessageType::Done, "done", Some(vec!["x.md".to_string()]), None),
        })
        .unwrap();
    store
        .commit(StateEvent::AgentCompleted { role: Role::from("a"), at_ms: 2 })
        .unwrap();

    // Tick 2: B's dependency is satisfied, it is scheduled then launched.
    supervisor.tick().await.unwrap();
    assert_eq!(store.agent(&Role::from("b")).unwrap().status, AgentStatus::Spawning);
    assert_eq!(launcher.launched.lock().len(), 2);

    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("b"), status: AgentStatus::Running, at_ms: 3 })
        .unwrap();
    store
        .commit(StateEvent::MessageAppended {
            message: apmas_core::AgentMessage::new(4, Role::from("b"), apmas_core::ToRole::Broadcast, MessageType::Done, "done", None, None),
        })
        .unwrap();
    store
        .commit(StateEvent::AgentCompleted { role: Role::from("b"), at_ms: 4 })
        .unwrap();

    // Tick 3: completion check fires.
    supervisor.tick().await.unwrap();
    assert_eq!(store.project().unwrap().phase, apmas_core::ProjectPhase::Completed);

    let done_messages: Vec<_> = store
        .with_state(|s| s.messages.iter().filter(|m| m.message_type == MessageType::Done).map(|m| m.from_role.clone()).collect::<Vec<_>>());
    assert_eq!(done_messages, vec![Role::from("a"), Role::from("b")]);
}

#[tokio::test]
async fn stale_worker_recovers_with_sentinel_context_on_first_retry() {
    let roster = Roster::new(vec![roster_entry("a", &[])]);
    let (_dir, store) = bootstrap_with_dir(&roster);
    let (mut supervisor, _launcher, _sink, clock) = supervisor_for(store.clone(), roster, 3);

    supervisor.tick().await.unwrap();
    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Running, at_ms: 0 })
        .unwrap();
    supervisor.record_heartbeat(Role::from("a"), 0);

    // Past HeartbeatTimeout with no further heartbeat.
    clock.set_epoch_ms(300_001);
    supervisor.tick().await.unwrap();

    let agent = store.agent(&Role::from("a")).unwrap();
    assert_eq!(agent.status, AgentStatus::Spawning);
    assert_eq!(agent.retry_count, 1);
    assert_eq!(agent.recovery_context, None); // cleared again by the same tick's launch sweep
}

#[tokio::test]
async fn checkpoint_driven_resume_carries_summary_and_item_lists() {
    let roster = Roster::new(vec![roster_entry("a", &[])]);
    let (_dir, store) = bootstrap_with_dir(&roster);
    let (mut supervisor, launcher, _sink, clock) = supervisor_for(store.clone(), roster, 3);

    supervisor.tick().await.unwrap();
    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Running, at_ms: 0 })
        .unwrap();
    supervisor.record_heartbeat(Role::from("a"), 0);

    let checkpoint = Checkpoint::new(
        Role::from("a"),
        10,
        "S",
        vec!["a".to_string(), "b".to_string()],
        vec!["c".to_string()],
        vec![],
        None,
        3,
    )
    .unwrap();
    store.commit(StateEvent::CheckpointStored { checkpoint }).unwrap();

    clock.set_epoch_ms(300_001);
    supervisor.tick().await.unwrap();

    let (_, last_prompt) = launcher.launched.lock().last().unwrap().clone();
    assert!(last_prompt.contains('S'));
    assert!(last_prompt.contains("[x] a"));
    assert!(last_prompt.contains("[x] b"));
    assert!(last_prompt.contains("[ ] c"));
}

#[tokio::test]
async fn three_consecutive_failures_escalate_and_notify_once() {
    let roster = Roster::new(vec![roster_entry("a", &[])]);
    let (_dir, store) = bootstrap_with_dir(&roster);
    let (mut supervisor, _launcher, sink, clock) = supervisor_for(store.clone(), roster, 3);

    supervisor.tick().await.unwrap();
    for _ in 0..3 {
        store
            .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Running, at_ms: clock.epoch_ms() })
            .unwrap();
        supervisor.record_heartbeat(Role::from("a"), clock.epoch_ms());
        clock.advance(std::time::Duration::from_millis(300_001));
        supervisor.tick().await.unwrap();
    }

    let agent = store.agent(&Role::from("a")).unwrap();
    assert_eq!(agent.status, AgentStatus::Escalated);
    assert_eq!(agent.retry_count, 3);
    assert_eq!(sink.notifications.lock().len(), 1);
    assert_ne!(store.project().unwrap().phase, apmas_core::ProjectPhase::Completed);
}

#[tokio::test]
async fn context_limit_pause_resumes_from_latest_checkpoint() {
    let roster = Roster::new(vec![roster_entry("a", &[])]);
    let (_dir, store) = bootstrap_with_dir(&roster);
    let (mut supervisor, launcher, _sink, clock) = supervisor_for(store.clone(), roster, 3);

    supervisor.tick().await.unwrap();
    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Running, at_ms: 0 })
        .unwrap();

    let checkpoint = Checkpoint::new(
        Role::from("a"),
        10,
        "almost there",
        vec!["setup".to_string()],
        vec!["finish".to_string()],
        vec![],
        None,
        2,
    )
    .unwrap();
    store.commit(StateEvent::CheckpointStored { checkpoint }).unwrap();

    // report_status(status=context_limit) maps to Paused per §4.7.
    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Paused, at_ms: 1 })
        .unwrap();

    clock.set_epoch_ms(2);
    supervisor.tick().await.unwrap();

    let agent = store.agent(&Role::from("a")).unwrap();
    assert_eq!(agent.status, AgentStatus::Spawning);

    let (_, last_prompt) = launcher.launched.lock().last().unwrap().clone();
    assert!(last_prompt.contains("almost there"));
}

#[tokio::test]
async fn a_crash_with_exit_code_zero_and_no_complete_call_is_still_treated_as_failed() {
    let roster = Roster::new(vec![roster_entry("a", &[])]);
    let (_dir, store) = bootstrap_with_dir(&roster);
    let (mut supervisor, launcher, _sink, _clock) = supervisor_for(store.clone(), roster, 3);

    supervisor.tick().await.unwrap();
    store
        .commit(StateEvent::AgentStatusChanged { role: Role::from("a"), status: AgentStatus::Running, at_ms: 0 })
        .unwrap();
    supervisor.record_heartbeat(Role::from("a"), 0);

    let handle = launcher.launched.lock().len() as u64; // FakeLauncher hands out sequential handles starting at 1
    launcher.inject_exit(handle, crate::launcher::ExitReport::Crashed { exit_code: Some(0) });

    supervisor.tick().await.unwrap();

    // A's only retry path from here is the recovery sweep, which already ran
    // this same tick once health sweep caught the crash — it is immediately
    // requeued rather than left Failed until the next poll.
    let agent = store.agent(&Role::from("a")).unwrap();
    assert_eq!(agent.retry_count, 1);
    assert_ne!(agent.status, AgentStatus::Completed);
}
