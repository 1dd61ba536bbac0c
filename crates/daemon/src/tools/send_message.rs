// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `send_message` (§4.7): appends a message from one role to another role
//! or the broadcast sentinel `all`.

use apmas_core::{Clock, DomainError, StateEvent, ToRole};
use apmas_wire::{MessageKind, SendMessageInput, SendMessageOutput};

use super::{parse_from_role, record_heartbeat, require_from_agent, storage_err};
use crate::state::AppState;

fn map_kind(kind: MessageKind) -> apmas_core::MessageType {
    match kind {
        MessageKind::Question => apmas_core::MessageType::Question,
        MessageKind::Answer => apmas_core::MessageType::Answer,
        MessageKind::Info => apmas_core::MessageType::Info,
        MessageKind::Request => apmas_core::MessageType::Request,
    }
}

pub async fn handle<C: Clock>(state: &AppState<C>, input: SendMessageInput) -> Result<SendMessageOutput, DomainError> {
    let from_role = parse_from_role(&input.from_role)?;
    require_from_agent(&state.store, &from_role)?;

    let to_role = ToRole::parse(&input.to_role).map_err(|_| DomainError::UnknownRole { role: input.to_role.clone() })?;

    let now = state.clock.epoch_ms();
    let message = apmas_core::AgentMessage::new(now, from_role.clone(), to_role, map_kind(input.kind), input.content, None, None);
    let message_id = message.id.to_string();

    state.store.commit(StateEvent::MessageAppended { message }).map_err(storage_err)?;
    record_heartbeat(state, from_role, now).await;

    Ok(SendMessageOutput { message_id })
}
