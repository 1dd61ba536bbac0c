// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup Roster validation (§3) and the initial `AgentState` population it
//! feeds into the State Store.

use std::collections::HashSet;

use apmas_core::{AgentState, Role, Roster, RosterError};

/// Validate `roster` against the closed set of configured worker kinds and,
/// on success, build the initial per-role `AgentState` every role starts
/// with (`Pending`, zero retries, no artifacts).
pub fn initialize(
    roster: &Roster,
    allowed_worker_kinds: &HashSet<String>,
) -> Result<Vec<AgentState>, RosterError> {
    roster.validate(allowed_worker_kinds)?;
    Ok(roster
        .entries
        .iter()
        .map(|entry| AgentState::pending(entry.role.clone(), entry.worker_kind.clone(), entry.dependencies.clone()))
        .collect())
}

/// Whether every dependency declared for `role` has already completed,
/// consulted by the Supervisor's scheduling sweep (§4.8).
pub fn dependencies_satisfied<F>(role: &Role, roster: &Roster, mut is_completed: F) -> bool
where
    F: FnMut(&Role) -> bool,
{
    roster
        .get(role)
        .is_some_and(|entry| entry.dependencies.iter().all(|dep| is_completed(dep)))
}

#[cfg(test)]
#[path = "roster_validate_tests.rs"]
mod tests;
