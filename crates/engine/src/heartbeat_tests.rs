// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fresh_heartbeat_is_not_stale() {
    let mut tracker = HeartbeatTracker::new();
    let role = Role::from("developer");
    tracker.record(role.clone(), 1_000);

    assert_eq!(tracker.staleness(&role, 1_500, 10_000, Some(61_000)), None);
}

#[test]
fn missed_heartbeat_window_is_stale() {
    let mut tracker = HeartbeatTracker::new();
    let role = Role::from("developer");
    tracker.record(role.clone(), 1_000);

    let reason = tracker.staleness(&role, 12_001, 10_000, Some(61_000));
    assert_eq!(reason, Some(StaleReason::NoHeartbeat));
}

#[test]
fn hard_deadline_overrides_a_recent_heartbeat() {
    let mut tracker = HeartbeatTracker::new();
    let role = Role::from("developer");
    tracker.record(role.clone(), 60_000);

    let reason = tracker.staleness(&role, 61_001, 10_000, Some(61_000));
    assert_eq!(reason, Some(StaleReason::DeadlineExceeded));
}

#[test]
fn a_role_never_heard_from_is_stale() {
    let tracker = HeartbeatTracker::new();
    let role = Role::from("developer");

    let reason = tracker.staleness(&role, 1, 10_000, None);
    assert_eq!(reason, Some(StaleReason::NoHeartbeat));
}

#[test]
fn seeding_from_durable_state_prevents_false_staleness_after_restart() {
    let mut tracker = HeartbeatTracker::new();
    let role = Role::from("developer");
    tracker.seed(role.clone(), Some(5_000));

    assert_eq!(tracker.staleness(&role, 5_500, 10_000, Some(65_000)), None);
}
