// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project-singleton event handlers.

use apmas_core::{Project, StateEvent};

use super::MaterializedState;

pub(crate) fn apply(state: &mut MaterializedState, event: &StateEvent) {
    match event {
        StateEvent::ProjectInitialized {
            name,
            working_directory,
            at_ms,
        } => {
            if state.project.is_none() {
                state.project =
                    Some(Project::new(name.clone(), working_directory.clone(), *at_ms));
            }
        }

        StateEvent::ProjectPhaseChanged { phase, at_ms } => {
            if let Some(project) = state.project.as_mut() {
                project.phase = *phase;
                if phase.is_terminal() {
                    project.completed_at_ms = Some(*at_ms);
                }
            }
        }

        _ => {}
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
