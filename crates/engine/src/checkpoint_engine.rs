// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint Engine (C5, §4.5): validates and stores checkpoints through
//! the State Store, and assembles the resume document consulted by the
//! Recovery Policy and by the `get_context` tool verb.
//!
//! No single teacher file matches this role one-to-one; the closest analog
//! is the context text the teacher's `decision.rs` assembles for a human
//! decision-maker (`build_context`). The actual rendering logic lives on
//! `apmas_core::Checkpoint` itself (`resume_document`/`no_checkpoint_sentinel`)
//! so it can be exercised without a State Store in `apmas-core`'s own tests;
//! this module is the thin, store-backed wrapper the Supervisor calls.

use std::sync::Arc;

use apmas_core::{no_checkpoint_sentinel, Checkpoint, Role, StateEvent};
use apmas_storage::{StateStore, StorageError};

pub struct CheckpointEngine {
    store: Arc<StateStore>,
}

impl CheckpointEngine {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Validate and commit a new checkpoint for `role` (§4.7 `checkpoint`
    /// verb). Validation failure (I5) is the caller's `DomainError`, not a
    /// storage concern, so this simply delegates to [`Checkpoint::new`] and
    /// commits only on success.
    pub fn store(&self, checkpoint: Checkpoint) -> Result<u64, StorageError> {
        self.store.commit(StateEvent::CheckpointStored { checkpoint })
    }

    /// The resume document for `role`'s most recent checkpoint, or the
    /// no-checkpoint sentinel (B3) if it has none yet.
    pub fn resume_document(&self, role: &Role) -> String {
        match self.store.latest_checkpoint(role) {
            Some(checkpoint) => checkpoint.resume_document(),
            None => no_checkpoint_sentinel(),
        }
    }

    pub fn latest(&self, role: &Role) -> Option<Checkpoint> {
        self.store.latest_checkpoint(role)
    }
}

#[cfg(test)]
#[path = "checkpoint_engine_tests.rs"]
mod tests;
