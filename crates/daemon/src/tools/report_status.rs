// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `report_status` (§4.7): maps a worker-reported status to an
//! `AgentStatus`/`MessageType` pair per the literal table, merges the
//! artifact set, and appends a broadcast status message to the log.

use apmas_core::{AgentStatus, Clock, DomainError, MessageType, StateEvent, ToRole};
use apmas_wire::{ReportStatusInput, ReportStatusOutput, WorkerStatus};

use super::{parse_role, record_heartbeat, require_agent, storage_err};
use crate::state::AppState;

fn map_status(status: WorkerStatus) -> (AgentStatus, MessageType) {
    match status {
        WorkerStatus::Working => (AgentStatus::Running, MessageType::Progress),
        WorkerStatus::Done => (AgentStatus::Completed, MessageType::Done),
        WorkerStatus::Blocked => (AgentStatus::Escalated, MessageType::Blocked),
        WorkerStatus::NeedsReview => (AgentStatus::Running, MessageType::NeedsReview),
        WorkerStatus::ContextLimit => (AgentStatus::Paused, MessageType::ContextLimit),
    }
}

pub async fn handle<C: Clock>(state: &AppState<C>, input: ReportStatusInput) -> Result<ReportStatusOutput, DomainError> {
    let role = parse_role(&input.role)?;
    require_agent(&state.store, &role)?;

    if matches!(input.status, WorkerStatus::Blocked) && input.blocked_reason.is_none() {
        return Err(DomainError::MissingBlockedReason);
    }

    let (agent_status, message_type) = map_status(input.status);
    let now = state.clock.epoch_ms();

    state
        .store
        .commit(StateEvent::AgentStatusChanged { role: role.clone(), status: agent_status, at_ms: now })
        .map_err(storage_err)?;

    if let Some(artifacts) = input.artifacts.clone() {
        state
            .store
            .commit(StateEvent::AgentArtifactsMerged { role: role.clone(), artifacts })
            .map_err(storage_err)?;
    }

    state
        .store
        .commit(StateEvent::AgentLastMessageSet { role: role.clone(), message: input.message.clone() })
        .map_err(storage_err)?;

    if let Some(reason) = &input.blocked_reason {
        state
            .store
            .commit(StateEvent::AgentLastErrorSet { role: role.clone(), error: reason.clone() })
            .map_err(storage_err)?;
    }

    if agent_status == AgentStatus::Completed {
        state
            .store
            .commit(StateEvent::AgentCompleted { role: role.clone(), at_ms: now })
            .map_err(storage_err)?;
    }

    let message = apmas_core::AgentMessage::new(now, role.clone(), ToRole::Broadcast, message_type, input.message.clone(), input.artifacts.clone(), None);
    state.store.commit(StateEvent::MessageAppended { message }).map_err(storage_err)?;

    record_heartbeat(state, role, now).await;

    Ok(ReportStatusOutput { acknowledged: true })
}
