// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `get_context` (§4.7): a read-only snapshot assembled from whichever
//! sections the caller asks for (all four when `include` is omitted).
//!
//! When `role` is present it narrows `agents` to that one role, `messages`
//! to that role's addressed messages (`StateStore::messages_for`), and
//! `artifacts` to that role's artifact set. When absent, `messages` falls
//! back to the tail of the full log (latest `message_limit`, default 50)
//! and `artifacts` to the union of every role's artifacts — the table in
//! §4.7 only says "optional role filter" without spelling out the absent
//! case, so this is the literal reading: the filter narrows what would
//! otherwise be the whole-project view.

use std::collections::BTreeSet;

use apmas_core::{AgentState, Clock, DomainError};
use apmas_wire::{AgentSnapshot, GetContextInput, GetContextOutput, IncludeSection, MessageSnapshot, ProjectSnapshot};

use super::parse_role;
use crate::state::AppState;

const DEFAULT_MESSAGE_LIMIT: usize = 50;

pub(crate) fn agent_snapshot(agent: &AgentState) -> AgentSnapshot {
    AgentSnapshot {
        role: agent.role.to_string(),
        status: agent.status.to_string(),
        retry_count: agent.retry_count,
        last_message: agent.last_message.clone(),
        last_error: agent.last_error.clone(),
    }
}

pub(crate) fn message_snapshot(message: &apmas_core::AgentMessage) -> MessageSnapshot {
    MessageSnapshot {
        from_role: message.from_role.to_string(),
        to_role: message.to_role.to_string(),
        message_type: message.message_type.to_string(),
        content: message.content.clone(),
        timestamp_ms: message.timestamp_ms,
    }
}

pub async fn handle<C: Clock>(state: &AppState<C>, input: GetContextInput) -> Result<GetContextOutput, DomainError> {
    let sections: Vec<IncludeSection> = input
        .include
        .unwrap_or_else(|| vec![IncludeSection::Project, IncludeSection::Agents, IncludeSection::Messages, IncludeSection::Artifacts]);

    let role_filter = input.role.as_deref().map(parse_role).transpose()?;
    let limit = input.message_limit.map(|n| n as usize).unwrap_or(DEFAULT_MESSAGE_LIMIT);

    let project = sections.contains(&IncludeSection::Project).then(|| {
        state.store.project().map(|p| ProjectSnapshot {
            name: p.name,
            working_directory: p.working_directory.to_string_lossy().into_owned(),
            phase: p.phase.to_string(),
        })
    }).flatten();

    let all_agents = state.store.agents();

    let agents = sections.contains(&IncludeSection::Agents).then(|| {
        all_agents
            .iter()
            .filter(|agent| role_filter.as_ref().map_or(true, |role| &agent.role == role))
            .map(agent_snapshot)
            .collect::<Vec<_>>()
    });

    let messages = sections.contains(&IncludeSection::Messages).then(|| {
        let mut messages = match &role_filter {
            Some(role) => state.store.messages_for(role),
            None => state.store.with_state(|s| s.messages.clone()),
        };
        if messages.len() > limit {
            messages = messages.split_off(messages.len() - limit);
        }
        messages.iter().map(message_snapshot).collect::<Vec<_>>()
    });

    let artifacts = sections.contains(&IncludeSection::Artifacts).then(|| {
        match &role_filter {
            Some(role) => all_agents
                .iter()
                .find(|a| &a.role == role)
                .map(|a| a.artifacts.iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default(),
            None => {
                let mut union: BTreeSet<String> = BTreeSet::new();
                for agent in &all_agents {
                    union.extend(agent.artifacts.iter().cloned());
                }
                union.into_iter().collect::<Vec<_>>()
            }
        }
    });

    Ok(GetContextOutput { project, agents, messages, artifacts })
}
