// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint event handler. Every stored checkpoint is kept (oldest first)
//! so history is inspectable, but only the last one matters for recovery
//! (§4.5). Guarded by id so replay cannot duplicate an entry.

use apmas_core::StateEvent;

use super::MaterializedState;

pub(crate) fn apply(state: &mut MaterializedState, event: &StateEvent) {
    if let StateEvent::CheckpointStored { checkpoint } = event {
        let entries = state.checkpoints.entry(checkpoint.role.clone()).or_default();
        if !entries.iter().any(|c| c.id == checkpoint.id) {
            entries.push(checkpoint.clone());
        }
    }
}

#[cfg(test)]
#[path = "checkpoints_tests.rs"]
mod tests;
