// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the `get_context` tool verb (§4.7) — a read-only snapshot
//! assembled from whichever sections the caller asks for.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IncludeSection {
    Project,
    Agents,
    Messages,
    Artifacts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetContextInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<IncludeSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Defaults to 50 when absent (§4.7).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectSnapshot {
    pub name: String,
    pub working_directory: String,
    pub phase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AgentSnapshot {
    pub role: String,
    pub status: String,
    pub retry_count: u32,
    pub last_message: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MessageSnapshot {
    pub from_role: String,
    pub to_role: String,
    pub message_type: String,
    pub content: String,
    pub timestamp_ms: u64,
}

/// Only the sections the caller asked for are `Some`; an omitted `include`
/// returns every section (§4.7's "optional include set").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GetContextOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<AgentSnapshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageSnapshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<String>>,
}

#[cfg(test)]
#[path = "get_context_tests.rs"]
mod tests;
