// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use apmas_core::{AgentMessage, MessageType, Role, ToRole};

fn message(content: &str) -> AgentMessage {
    AgentMessage::new(
        1,
        Role::from("architect"),
        ToRole::from(Role::from("developer")),
        MessageType::Assignment,
        content,
        None,
        None,
    )
}

#[test]
fn append_is_idempotent_by_id() {
    let mut state = MaterializedState::default();
    let msg = message("start on the parser");
    let event = StateEvent::MessageAppended {
        message: msg.clone(),
    };

    apply(&mut state, &event);
    apply(&mut state, &event);

    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].content, "start on the parser");
}

#[test]
fn distinct_messages_both_persist() {
    let mut state = MaterializedState::default();
    apply(
        &mut state,
        &StateEvent::MessageAppended {
            message: message("first"),
        },
    );
    apply(
        &mut state,
        &StateEvent::MessageAppended {
            message: message("second"),
        },
    );

    assert_eq!(state.messages.len(), 2);
}
