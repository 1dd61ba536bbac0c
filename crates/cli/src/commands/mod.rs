// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing read-only inspection commands (`apmasctl`).
//!
//! Per §7's user-visible failure behavior note ("the operator sees
//! escalation via the notification sink; all state remains inspectable
//! through the State Store and resource reads"), these commands open the
//! same on-disk State Store the running `apmasd` writes to and read it
//! directly — there is no separate admin RPC protocol to maintain.

pub mod agents;
pub mod checkpoint;
pub mod messages;
pub mod status;

use std::path::PathBuf;

use apmas_storage::{StateStore, StorageError};

pub fn open_store(data_dir: &PathBuf) -> Result<StateStore, StorageError> {
    StateStore::open(data_dir)
}
