// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-internal errors (§4.2a, §7).
//!
//! [`DomainError`](apmas_core::DomainError) is the closed set returned across
//! the Tool Surface boundary. The Supervisor needs a few more cases that
//! never reach a worker — an illegal lifecycle transition it caught itself,
//! a launch that failed before a process ever started, a Roster that didn't
//! validate — so it gets its own error type that wraps the domain one rather
//! than widening it.

use apmas_core::{AgentStatus, DomainError, Role, RosterError};

use crate::launcher::LauncherError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("illegal transition for role {role}: {from} -> {to}")]
    IllegalTransition {
        role: Role,
        from: AgentStatus,
        to: AgentStatus,
    },

    #[error("roster validation failed: {0}")]
    InvalidRoster(#[from] RosterError),

    #[error("failed to launch worker for role {role}: {source}")]
    LaunchFailed {
        role: Role,
        #[source]
        source: LauncherError,
    },

    #[error(transparent)]
    Storage(#[from] apmas_storage::StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
