// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `checkpoint` (§4.7, §4.5): validates the completed/pending count
//! invariant (I5), stores the checkpoint, and updates `last_message` — no
//! message-log entry is appended for this verb.

use apmas_core::{Checkpoint, Clock, DomainError, StateEvent};
use apmas_wire::{CheckpointInput, CheckpointOutput};

use super::{parse_role, record_heartbeat, require_agent, storage_err};
use crate::state::AppState;

pub async fn handle<C: Clock>(state: &AppState<C>, input: CheckpointInput) -> Result<CheckpointOutput, DomainError> {
    let role = parse_role(&input.role)?;
    require_agent(&state.store, &role)?;

    let now = state.clock.epoch_ms();
    let checkpoint = Checkpoint::new(
        role.clone(),
        now,
        input.summary,
        input.completed_items,
        input.pending_items,
        input.active_files.unwrap_or_default(),
        input.notes,
        input.total_count,
    )?;

    let percent_complete = checkpoint.percent_complete();
    let checkpoint_id = checkpoint.id.to_string();

    state.checkpoints.store(checkpoint).map_err(storage_err)?;
    state
        .store
        .commit(StateEvent::AgentLastMessageSet { role: role.clone(), message: format!("checkpoint stored ({percent_complete:.0}% complete)") })
        .map_err(storage_err)?;

    record_heartbeat(state, role, now).await;

    Ok(CheckpointOutput { checkpoint_id, percent_complete })
}
