// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource payload types for the three read-only MCP resources of §4.7b:
//! `project/state`, `messages/{role}`, `checkpoints/{role}`. Each resource
//! read returns exactly one `text`/`application/json` content item carrying
//! one of these types, serialized whole.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::get_context::{AgentSnapshot, MessageSnapshot, ProjectSnapshot};

pub const PROJECT_STATE_URI: &str = "project/state";

pub fn messages_resource_uri(role: &str) -> String {
    format!("messages/{role}")
}

pub fn checkpoint_resource_uri(role: &str) -> String {
    format!("checkpoints/{role}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectStateResource {
    pub project: ProjectSnapshot,
    pub agents: Vec<AgentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MessagesResource {
    pub role: String,
    pub messages: Vec<MessageSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckpointSnapshot {
    pub summary: String,
    pub completed_items: Vec<String>,
    pub pending_items: Vec<String>,
    pub percent_complete: f64,
}

/// `checkpoint` is `None` when the role has never stored one — the resource
/// itself carries that absence; the "no previous checkpoint" sentinel text
/// is a recovery-prompt concern (`apmas_core::no_checkpoint_sentinel`), not
/// a resource-shape one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckpointResource {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<CheckpointSnapshot>,
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
