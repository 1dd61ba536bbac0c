// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `request_help` (§4.7): `kind=human` escalates the caller directly;
//! `kind=agent` sends a Question to `target_role` (required); `kind=clarification`
//! broadcasts a Question, since no literal "supervisor" role entity exists
//! in the data model (see DESIGN.md).
//!
//! The error-kinds column in §4.7's verb table lists `UnknownRole` (not
//! `UnknownFromRole`) for this verb even though its field is `from_role` —
//! taken literally rather than assumed to be a typo (see DESIGN.md).

use apmas_core::{AgentStatus, Clock, DomainError, StateEvent, ToRole};
use apmas_wire::{HelpKind, RequestHelpInput, RequestHelpOutput};

use super::{parse_role, record_heartbeat, require_agent, storage_err};
use crate::state::AppState;

pub async fn handle<C: Clock>(state: &AppState<C>, input: RequestHelpInput) -> Result<RequestHelpOutput, DomainError> {
    let from_role = parse_role(&input.from_role)?;
    require_agent(&state.store, &from_role)?;

    let now = state.clock.epoch_ms();

    match input.kind {
        HelpKind::Human => {
            state
                .store
                .commit(StateEvent::AgentStatusChanged { role: from_role.clone(), status: AgentStatus::Escalated, at_ms: now })
                .map_err(storage_err)?;
            state
                .store
                .commit(StateEvent::AgentLastErrorSet { role: from_role.clone(), error: input.issue.clone() })
                .map_err(storage_err)?;

            state
                .supervisor
                .lock()
                .await
                .notify_escalation(&from_role, &input.issue)
                .await;
        }
        HelpKind::Agent => {
            let target = input.target_role.as_deref().ok_or(DomainError::MissingTarget)?;
            let target_role = parse_role(target)?;
            let content = render_help_request(&input.issue, input.context.as_deref());
            append_question(state, from_role.clone(), ToRole::Role(target_role), content, now).await?;
        }
        HelpKind::Clarification => {
            let content = render_help_request(&input.issue, input.context.as_deref());
            append_question(state, from_role.clone(), ToRole::Broadcast, content, now).await?;
        }
    }

    record_heartbeat(state, from_role, now).await;

    Ok(RequestHelpOutput { acknowledged: true })
}

fn render_help_request(issue: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!("{issue}\n\ncontext: {context}"),
        None => issue.to_string(),
    }
}

async fn append_question<C: Clock>(
    state: &AppState<C>,
    from_role: apmas_core::Role,
    to_role: ToRole,
    content: String,
    now: u64,
) -> Result<(), DomainError> {
    let message = apmas_core::AgentMessage::new(now, from_role, to_role, apmas_core::MessageType::Question, content, None, None);
    state.store.commit(StateEvent::MessageAppended { message }).map_err(storage_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{app_state, role};

    #[tokio::test]
    async fn human_help_escalates_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(&dir);

        handle(
            &state,
            RequestHelpInput { from_role: "architect".to_string(), kind: HelpKind::Human, issue: "need a decision".to_string(), target_role: None, context: None },
        )
        .await
        .unwrap();

        let agent = state.store.agent(&role("architect")).unwrap();
        assert_eq!(agent.status, AgentStatus::Escalated);
        assert_eq!(agent.last_error.as_deref(), Some("need a decision"));
    }

    #[tokio::test]
    async fn agent_help_without_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(&dir);

        let err = handle(
            &state,
            RequestHelpInput { from_role: "architect".to_string(), kind: HelpKind::Agent, issue: "need review".to_string(), target_role: None, context: None },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::MissingTarget));
    }

    #[tokio::test]
    async fn clarification_broadcasts_a_question() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(&dir);

        handle(
            &state,
            RequestHelpInput { from_role: "architect".to_string(), kind: HelpKind::Clarification, issue: "which approach?".to_string(), target_role: None, context: None },
        )
        .await
        .unwrap();

        let messages = state.store.with_state(|s| s.messages.clone());
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0].to_role, ToRole::Broadcast));
    }
}
