// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Heartbeat Tracker (C3, §4.3): per-role liveness bookkeeping consulted by
//! the Supervisor's health sweep.
//!
//! Grounded on the teacher's `MonitorState` staleness check
//! (`crates/daemon/src/engine/runtime/monitor.rs`), simplified to the one
//! rule this specification needs: no cooldown windows, no per-trigger
//! backoff — a role is either within its deadline or it isn't.

use std::collections::HashMap;

use apmas_core::Role;

/// Tracks the last time each role was heard from, purely in memory — the
/// durable facts (`last_heartbeat_ms`, `timeout_at_ms`) live in
/// [`apmas_core::AgentState`] via the State Store. This tracker exists so the
/// health sweep can classify staleness without re-deriving it from two
/// separate `Option<u64>` fields at every call site.
#[derive(Debug, Default)]
pub struct HeartbeatTracker {
    last_seen_ms: HashMap<Role, u64>,
}

/// Why a role's worker is considered stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// No heartbeat arrived within `HeartbeatTimeout` of the last one seen.
    NoHeartbeat,
    /// The role's hard `timeout-at` deadline passed regardless of heartbeats.
    DeadlineExceeded,
}

impl HeartbeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heartbeat for `role` at `now_ms`.
    pub fn record(&mut self, role: Role, now_ms: u64) {
        self.last_seen_ms.insert(role, now_ms);
    }

    /// Seed the tracker from durable state on startup or reconnect, so a role
    /// that last reported before a daemon restart isn't immediately judged
    /// stale against a tracker with no memory of it.
    pub fn seed(&mut self, role: Role, last_heartbeat_ms: Option<u64>) {
        if let Some(ms) = last_heartbeat_ms {
            self.last_seen_ms.insert(role, ms);
        }
    }

    pub fn last_seen(&self, role: &Role) -> Option<u64> {
        self.last_seen_ms.get(role).copied()
    }

    pub fn forget(&mut self, role: &Role) {
        self.last_seen_ms.remove(role);
    }

    /// A `Running` role is stale when `now - last-seen > HeartbeatTimeout`,
    /// or when `now > timeout-at` regardless of heartbeat recency (§4.3).
    /// `timeout_at_ms` is the role's current deadline, extended by each
    /// accepted heartbeat.
    pub fn staleness(
        &self,
        role: &Role,
        now_ms: u64,
        heartbeat_timeout_ms: u64,
        timeout_at_ms: Option<u64>,
    ) -> Option<StaleReason> {
        if let Some(deadline) = timeout_at_ms {
            if now_ms > deadline {
                return Some(StaleReason::DeadlineExceeded);
            }
        }
        match self.last_seen_ms.get(role) {
            Some(last) if now_ms.saturating_sub(*last) > heartbeat_timeout_ms => {
                Some(StaleReason::NoHeartbeat)
            }
            None => Some(StaleReason::NoHeartbeat),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
