// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable event type written to the Write-Ahead Log and replayed into
//! `MaterializedState` (SPEC_FULL §4.1a). Every State Store mutation is
//! expressed as exactly one `StateEvent`; replay is idempotent per variant.

use crate::agent_state::AgentStatus;
use crate::checkpoint::Checkpoint;
use crate::message::AgentMessage;
use crate::project::ProjectPhase;
use crate::role::Role;

/// One WAL frame.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum StateEvent {
    ProjectInitialized {
        name: String,
        working_directory: std::path::PathBuf,
        at_ms: u64,
    },
    ProjectPhaseChanged {
        phase: ProjectPhase,
        at_ms: u64,
    },
    AgentRegistered {
        role: Role,
        worker_kind: String,
        dependencies: Vec<Role>,
    },
    AgentStatusChanged {
        role: Role,
        status: AgentStatus,
        at_ms: u64,
    },
    AgentSpawned {
        role: Role,
        at_ms: u64,
        timeout_at_ms: u64,
    },
    AgentHeartbeat {
        role: Role,
        at_ms: u64,
        new_timeout_at_ms: u64,
        progress: Option<String>,
    },
    AgentArtifactsMerged {
        role: Role,
        artifacts: Vec<String>,
    },
    AgentLastMessageSet {
        role: Role,
        message: String,
    },
    AgentLastErrorSet {
        role: Role,
        error: String,
    },
    AgentRetryIncremented {
        role: Role,
        retry_count: u32,
    },
    AgentRecoveryContextSet {
        role: Role,
        context: Option<String>,
    },
    AgentContextUsageSet {
        role: Role,
        estimated_context_usage: u64,
    },
    AgentCompleted {
        role: Role,
        at_ms: u64,
    },
    MessageAppended {
        message: AgentMessage,
    },
    CheckpointStored {
        checkpoint: Checkpoint,
    },
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
