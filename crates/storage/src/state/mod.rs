// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state built by replaying the WAL (SPEC_FULL §4.1a).

mod agents;
mod checkpoints;
mod messages;
mod project;

use std::collections::HashMap;

use apmas_core::{AgentMessage, AgentState, Checkpoint, Project, Role, StateEvent};
use serde::{Deserialize, Serialize};

/// The in-memory projection of everything ever written to the WAL.
///
/// Rebuilt from scratch by replaying every `StateEvent` in order (or
/// rehydrated from a snapshot plus the entries after it).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MaterializedState {
    pub project: Option<Project>,
    pub agents: HashMap<Role, AgentState>,
    pub messages: Vec<AgentMessage>,
    /// All checkpoints ever stored per role, oldest first; the last entry is
    /// the one the Checkpoint Engine resumes from (§4.5).
    pub checkpoints: HashMap<Role, Vec<Checkpoint>>,
}

impl MaterializedState {
    pub fn latest_checkpoint(&self, role: &Role) -> Option<&Checkpoint> {
        self.checkpoints.get(role).and_then(|cps| cps.last())
    }

    pub fn messages_for<'a>(&'a self, role: &'a Role) -> impl Iterator<Item = &'a AgentMessage> {
        self.messages
            .iter()
            .filter(move |m| m.to_role.matches(role))
    }

    /// Apply one event, deriving the next state.
    ///
    /// # Idempotency requirement
    ///
    /// Every handler must be idempotent: applying the same event twice must
    /// produce the same state as applying it once, because events may be
    /// replayed more than once (once for immediate visibility when the Tool
    /// Surface handles a verb, again during WAL replay after a restart).
    /// Handlers use assignment rather than mutation and guard inserts with
    /// existence checks to hold to this.
    pub fn apply_event(&mut self, event: &StateEvent) {
        match event {
            StateEvent::ProjectInitialized { .. } | StateEvent::ProjectPhaseChanged { .. } => {
                project::apply(self, event)
            }

            StateEvent::AgentRegistered { .. }
            | StateEvent::AgentStatusChanged { .. }
            | StateEvent::AgentSpawned { .. }
            | StateEvent::AgentHeartbeat { .. }
            | StateEvent::AgentArtifactsMerged { .. }
            | StateEvent::AgentLastMessageSet { .. }
            | StateEvent::AgentLastErrorSet { .. }
            | StateEvent::AgentRetryIncremented { .. }
            | StateEvent::AgentRecoveryContextSet { .. }
            | StateEvent::AgentContextUsageSet { .. }
            | StateEvent::AgentCompleted { .. } => agents::apply(self, event),

            StateEvent::MessageAppended { .. } => messages::apply(self, event),

            StateEvent::CheckpointStored { .. } => checkpoints::apply(self, event),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
