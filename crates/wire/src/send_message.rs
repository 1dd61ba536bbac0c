// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the `send_message` tool verb (§4.7).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A message addressee: a specific role name, or the broadcast sentinel.
///
/// Kept as a plain string wrapper at the wire boundary rather than reusing
/// `apmas_core::ToRole` directly — `apmas-daemon` parses it into the domain
/// type (and reports `UnknownFromRole` on a bad `from_role`), so this crate
/// has no reason to duplicate that validation.
pub type ToRoleWire = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Question,
    Answer,
    Info,
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SendMessageInput {
    pub from_role: String,
    pub to_role: ToRoleWire,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SendMessageOutput {
    pub message_id: String,
}

#[cfg(test)]
#[path = "send_message_tests.rs"]
mod tests;
