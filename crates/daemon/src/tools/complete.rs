// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `complete` (§4.7): transitions the role to `Completed`, merges final
//! artifacts, and appends a Done message. A role already in a terminal
//! state (`Completed` or `Escalated`) returns `AlreadyTerminal` without
//! mutating anything (L3: a second `complete` call is a no-op).

use apmas_core::{AgentStatus, Clock, DomainError, StateEvent, ToRole};
use apmas_wire::{CompleteInput, CompleteOutput};

use super::{parse_role, record_heartbeat, require_agent, storage_err};
use crate::state::AppState;

pub async fn handle<C: Clock>(state: &AppState<C>, input: CompleteInput) -> Result<CompleteOutput, DomainError> {
    let role = parse_role(&input.role)?;
    let agent = require_agent(&state.store, &role)?;

    if agent.is_terminal() {
        return Err(DomainError::AlreadyTerminal { role: role.to_string() });
    }

    let now = state.clock.epoch_ms();

    state
        .store
        .commit(StateEvent::AgentCompleted { role: role.clone(), at_ms: now })
        .map_err(storage_err)?;
    state
        .store
        .commit(StateEvent::AgentArtifactsMerged { role: role.clone(), artifacts: input.artifacts.clone() })
        .map_err(storage_err)?;
    state
        .store
        .commit(StateEvent::AgentLastMessageSet { role: role.clone(), message: input.summary.clone() })
        .map_err(storage_err)?;

    let message = apmas_core::AgentMessage::new(now, role.clone(), ToRole::Broadcast, apmas_core::MessageType::Done, input.summary, Some(input.artifacts), None);
    state.store.commit(StateEvent::MessageAppended { message }).map_err(storage_err)?;

    record_heartbeat(state, role, now).await;

    let elapsed_ms = now.saturating_sub(agent.spawned_at_ms.unwrap_or(now));
    Ok(CompleteOutput { acknowledged: true, elapsed_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{app_state, role};

    #[tokio::test]
    async fn completes_a_running_role() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(&dir);

        let output = handle(
            &state,
            CompleteInput { role: "architect".to_string(), summary: "done".to_string(), artifacts: vec!["design.md".to_string()], notes: None },
        )
        .await
        .unwrap();

        assert!(output.acknowledged);
        let agent = state.store.agent(&role("architect")).unwrap();
        assert_eq!(agent.status, AgentStatus::Completed);
        assert!(agent.artifacts.contains("design.md"));
    }

    #[tokio::test]
    async fn second_complete_call_is_rejected_without_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(&dir);

        handle(&state, CompleteInput { role: "architect".to_string(), summary: "done".to_string(), artifacts: vec![], notes: None })
            .await
            .unwrap();

        let err = handle(&state, CompleteInput { role: "architect".to_string(), summary: "done again".to_string(), artifacts: vec![], notes: None })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::AlreadyTerminal { .. }));
        let agent = state.store.agent(&role("architect")).unwrap();
        assert_eq!(agent.last_message.as_deref(), Some("done"));
    }
}
