// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The State Store's public API: one `parking_lot::Mutex` guarding the WAL
//! and its materialized projection, committed to together so a caller never
//! observes one without the other (§4.1).

use std::path::{Path, PathBuf};

use apmas_core::{AgentMessage, AgentState, Checkpoint, Project, Role, StateEvent};
use parking_lot::Mutex;

use crate::state::MaterializedState;
use crate::wal::{Wal, WalError};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Wal(#[from] WalError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

struct Inner {
    wal: Wal,
    state: MaterializedState,
}

/// The coordination plane's durable state store: one WAL per data directory,
/// replayed into a `MaterializedState` on open and kept current by
/// committing every mutation through [`StateStore::commit`].
pub struct StateStore {
    inner: Mutex<Inner>,
}

impl StateStore {
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir: PathBuf = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let mut wal = Wal::open(data_dir.join("events.wal"), 0)?;
        let mut state = MaterializedState::default();
        for entry in wal.entries_after(0)? {
            state.apply_event(&entry.event);
        }
        wal.mark_processed(wal.write_seq());

        Ok(Self {
            inner: Mutex::new(Inner { wal, state }),
        })
    }

    /// Append `event` to the WAL, flush it, and apply it to the projection —
    /// all under one lock hold, so readers never see a half-applied event.
    pub fn commit(&self, event: StateEvent) -> Result<u64, StorageError> {
        let mut inner = self.inner.lock();
        let seq = inner.wal.append(&event)?;
        inner.wal.flush()?;
        inner.state.apply_event(&event);
        inner.wal.mark_processed(seq);
        Ok(seq)
    }

    pub fn project(&self) -> Option<Project> {
        self.inner.lock().state.project.clone()
    }

    pub fn agent(&self, role: &Role) -> Option<AgentState> {
        self.inner.lock().state.agents.get(role).cloned()
    }

    pub fn agents(&self) -> Vec<AgentState> {
        self.inner.lock().state.agents.values().cloned().collect()
    }

    pub fn messages_for(&self, role: &Role) -> Vec<AgentMessage> {
        self.inner
            .lock()
            .state
            .messages_for(role)
            .cloned()
            .collect()
    }

    pub fn latest_checkpoint(&self, role: &Role) -> Option<Checkpoint> {
        self.inner.lock().state.latest_checkpoint(role).cloned()
    }

    /// Run `f` against a read-only snapshot of the projection under the lock.
    /// Prefer the typed accessors above; this exists for call sites that need
    /// a consistent read across more than one entity at once.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&MaterializedState) -> R,
    {
        let inner = self.inner.lock();
        f(&inner.state)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
