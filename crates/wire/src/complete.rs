// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the `complete` tool verb (§4.7).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompleteInput {
    pub role: String,
    pub summary: String,
    pub artifacts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Acknowledgment carrying the role's total elapsed run time
/// (`completed_at - spawned_at`, §4.7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompleteOutput {
    pub acknowledged: bool,
    pub elapsed_ms: u64,
}

#[cfg(test)]
#[path = "complete_tests.rs"]
mod tests;
