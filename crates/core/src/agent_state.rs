// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-role agent state and its lifecycle status.

use indexmap::IndexSet;

use crate::role::Role;

/// Lifecycle status of one role's agent.
///
/// Transition legality is the Supervisor's responsibility
/// ([`AgentStatus::is_legal_transition`]); the State Store does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Pending,
    Queued,
    Spawning,
    Running,
    Paused,
    Completed,
    TimedOut,
    Failed,
    Escalated,
}

crate::simple_display! {
    AgentStatus {
        Pending => "pending",
        Queued => "queued",
        Spawning => "spawning",
        Running => "running",
        Paused => "paused",
        Completed => "completed",
        TimedOut => "timed_out",
        Failed => "failed",
        Escalated => "escalated",
    }
}

impl AgentStatus {
    /// `Escalated` and `Completed` are terminal for a role within a run (§4.2).
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::Completed | AgentStatus::Escalated)
    }

    /// Whether `self -> to` is a legal transition per the lifecycle table in §4.2.
    pub fn is_legal_transition(&self, to: AgentStatus) -> bool {
        use AgentStatus::*;
        matches!(
            (self, to),
            (Pending, Queued)
                | (Queued, Spawning)
                | (Spawning, Running)
                | (Running, Running)
                | (Running, Paused)
                | (Running, Completed)
                | (Running, TimedOut)
                | (Running, Failed)
                | (Paused, Queued)
                | (TimedOut, Queued)
                | (Failed, Queued)
                | (TimedOut, Escalated)
                | (Failed, Escalated)
        )
    }
}

/// All durable state tracked for one Roster role.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgentState {
    pub role: Role,
    pub worker_kind: String,
    pub status: AgentStatus,
    pub spawned_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub timeout_at_ms: Option<u64>,
    pub retry_count: u32,
    /// Insertion-ordered, deduplicated; artifacts are never retracted (I3).
    pub artifacts: IndexSet<String>,
    /// Immutable, copied from the Roster entry at startup.
    pub dependencies: Vec<Role>,
    pub last_message: Option<String>,
    pub last_error: Option<String>,
    pub estimated_context_usage: Option<u64>,
    pub last_heartbeat_ms: Option<u64>,
    pub recovery_context: Option<String>,
}

impl AgentState {
    /// A freshly-created record, as the Supervisor creates one per Roster entry at startup.
    pub fn pending(role: Role, worker_kind: impl Into<String>, dependencies: Vec<Role>) -> Self {
        Self {
            role,
            worker_kind: worker_kind.into(),
            status: AgentStatus::Pending,
            spawned_at_ms: None,
            completed_at_ms: None,
            timeout_at_ms: None,
            retry_count: 0,
            artifacts: IndexSet::new(),
            dependencies,
            last_message: None,
            last_error: None,
            estimated_context_usage: None,
            last_heartbeat_ms: None,
            recovery_context: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Merge new artifact paths into the monotonically-growing set (I3).
    pub fn merge_artifacts<I: IntoIterator<Item = String>>(&mut self, paths: I) {
        for path in paths {
            self.artifacts.insert(path);
        }
    }

    pub fn all_dependencies_completed<F>(&self, mut is_completed: F) -> bool
    where
        F: FnMut(&Role) -> bool,
    {
        self.dependencies.iter().all(|dep| is_completed(dep))
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct AgentStateBuilder => AgentState {
        into { worker_kind: String = "generic" }
        set { role: Role = Role::new("test-role").expect("valid test role") }
        set { status: AgentStatus = AgentStatus::Pending }
        set { spawned_at_ms: Option<u64> = None }
        set { completed_at_ms: Option<u64> = None }
        set { timeout_at_ms: Option<u64> = None }
        set { retry_count: u32 = 0 }
        set { artifacts: IndexSet<String> = IndexSet::new() }
        set { dependencies: Vec<Role> = Vec::new() }
        option { last_message: String = None }
        option { last_error: String = None }
        set { estimated_context_usage: Option<u64> = None }
        set { last_heartbeat_ms: Option<u64> = None }
        option { recovery_context: String = None }
    }
}

#[cfg(test)]
#[path = "agent_state_tests.rs"]
mod tests;
