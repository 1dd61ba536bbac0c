// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the `report_status` tool verb (§4.7).
//!
//! The status → `AgentStatus`/`MessageType` mapping table lives with the
//! handler that applies it (`apmas-daemon`'s tool surface), not here — this
//! module only fixes the closed set of values a worker may report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Working,
    Done,
    Blocked,
    NeedsReview,
    ContextLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportStatusInput {
    pub role: String,
    pub status: WorkerStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<String>>,
    /// Required when `status == blocked` (`MissingBlockedReason` otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportStatusOutput {
    pub acknowledged: bool,
}

#[cfg(test)]
#[path = "report_status_tests.rs"]
mod tests;
