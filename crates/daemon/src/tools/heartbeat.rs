// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `heartbeat` (§4.7): extends a role's deadline and records progress text
//! without logging a message — "a Heartbeat message is *not* logged."

use apmas_core::{Clock, DomainError, StateEvent};
use apmas_wire::{HeartbeatInput, HeartbeatOutput};

use super::{parse_role, record_heartbeat, require_agent, storage_err};
use crate::state::AppState;

pub async fn handle<C: Clock>(state: &AppState<C>, input: HeartbeatInput) -> Result<HeartbeatOutput, DomainError> {
    let role = parse_role(&input.role)?;
    require_agent(&state.store, &role)?;

    let now = state.clock.epoch_ms();
    let timeout_at_ms = now + state.config.heartbeat_timeout_ms;

    state
        .store
        .commit(StateEvent::AgentHeartbeat {
            role: role.clone(),
            at_ms: now,
            new_timeout_at_ms: timeout_at_ms,
            progress: input.progress.clone(),
        })
        .map_err(storage_err)?;

    if let Some(context_usage) = input.context_usage {
        state
            .store
            .commit(StateEvent::AgentContextUsageSet {
                role: role.clone(),
                estimated_context_usage: context_usage,
            })
            .map_err(storage_err)?;
    }

    record_heartbeat(state, role, now).await;

    Ok(HeartbeatOutput { acknowledged: true, timeout_at_ms })
}
