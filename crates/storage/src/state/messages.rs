// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message-log event handler. The log itself is append-only (§3, §4.6); the
//! only state change here is appending, guarded by id so a replayed event
//! never duplicates an entry.

use apmas_core::StateEvent;

use super::MaterializedState;

pub(crate) fn apply(state: &mut MaterializedState, event: &StateEvent) {
    if let StateEvent::MessageAppended { message } = event {
        if !state.messages.iter().any(|m| m.id == message.id) {
            state.messages.push(message.clone());
        }
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
