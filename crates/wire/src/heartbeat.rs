// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the `heartbeat` tool verb (§4.7).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a worker reports itself as doing between status reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Working,
    Thinking,
    Writing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeartbeatInput {
    pub role: String,
    pub activity: Activity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_usage: Option<u64>,
}

/// Acknowledgment carrying the role's extended deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HeartbeatOutput {
    pub acknowledged: bool,
    pub timeout_at_ms: u64,
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
