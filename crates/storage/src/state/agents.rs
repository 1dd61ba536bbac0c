// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent lifecycle event handlers.

use apmas_core::{AgentState, AgentStatus, StateEvent};

use super::MaterializedState;

pub(crate) fn apply(state: &mut MaterializedState, event: &StateEvent) {
    match event {
        StateEvent::AgentRegistered {
            role,
            worker_kind,
            dependencies,
        } => {
            state.agents.entry(role.clone()).or_insert_with(|| {
                AgentState::pending(role.clone(), worker_kind.clone(), dependencies.clone())
            });
        }

        StateEvent::AgentStatusChanged { role, status, .. } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.status = *status;
            }
        }

        StateEvent::AgentSpawned {
            role,
            at_ms,
            timeout_at_ms,
        } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.spawned_at_ms = Some(*at_ms);
                agent.timeout_at_ms = Some(*timeout_at_ms);
            }
        }

        StateEvent::AgentHeartbeat {
            role,
            at_ms,
            new_timeout_at_ms,
            progress,
        } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.last_heartbeat_ms = Some(*at_ms);
                agent.timeout_at_ms = Some(*new_timeout_at_ms);
                if let Some(progress) = progress {
                    agent.last_message = Some(progress.clone());
                }
            }
        }

        StateEvent::AgentArtifactsMerged { role, artifacts } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.merge_artifacts(artifacts.iter().cloned());
            }
        }

        StateEvent::AgentLastMessageSet { role, message } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.last_message = Some(message.clone());
            }
        }

        StateEvent::AgentLastErrorSet { role, error } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.last_error = Some(error.clone());
            }
        }

        StateEvent::AgentRetryIncremented { role, retry_count } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.retry_count = *retry_count;
            }
        }

        StateEvent::AgentRecoveryContextSet { role, context } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.recovery_context = context.clone();
            }
        }

        StateEvent::AgentContextUsageSet {
            role,
            estimated_context_usage,
        } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.estimated_context_usage = Some(*estimated_context_usage);
            }
        }

        StateEvent::AgentCompleted { role, at_ms } => {
            if let Some(agent) = state.agents.get_mut(role) {
                agent.status = AgentStatus::Completed;
                agent.completed_at_ms = Some(*at_ms);
            }
        }

        _ => {}
    }
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
