// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Coordination Plane's durable side: a newline-delimited-JSON
//! write-ahead log plus the materialized projection replayed from it
//! (SPEC_FULL §4.1a, §4.1b).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod state;
mod store;
mod wal;

pub use state::MaterializedState;
pub use store::{StateStore, StorageError};
pub use wal::{Wal, WalEntry, WalError, FLUSH_ENTRY_THRESHOLD, FLUSH_INTERVAL};
