// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the `checkpoint` tool verb (§4.7, §4.5).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckpointInput {
    pub role: String,
    pub summary: String,
    pub completed_items: Vec<String>,
    pub pending_items: Vec<String>,
    pub total_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Acknowledgment carrying the checkpoint's computed completion percentage
/// (§4.5's `percent_complete`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckpointOutput {
    pub checkpoint_id: String,
    pub percent_complete: f64,
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
