// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool descriptors consumed by `apmas-daemon`'s MCP server to register the
//! seven verbs of §4.7 with `rmcp`, shaped after
//! `ToolDefinition`/`definition_to_rmcp_tool` in the example pack's
//! `agent-mcp`/`neuron-types` crates — a plain, transport-agnostic
//! descriptor that the daemon converts into an `rmcp::model::Tool` at
//! startup, rather than this crate taking a dependency on `rmcp` itself.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    CheckpointInput, CompleteInput, GetContextInput, HeartbeatInput, ReportStatusInput,
    RequestHelpInput, SendMessageInput,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

/// The seven tool verbs of §4.7, in the order the table lists them.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "heartbeat",
            description: "Report liveness and optionally current activity/progress.",
            input_schema: schema::<HeartbeatInput>(),
        },
        ToolDefinition {
            name: "report_status",
            description: "Report a status transition (working, done, blocked, needs_review, context_limit).",
            input_schema: schema::<ReportStatusInput>(),
        },
        ToolDefinition {
            name: "checkpoint",
            description: "Store a progress checkpoint for later resume.",
            input_schema: schema::<CheckpointInput>(),
        },
        ToolDefinition {
            name: "get_context",
            description: "Read a snapshot of project, agent, message, and artifact state.",
            input_schema: schema::<GetContextInput>(),
        },
        ToolDefinition {
            name: "send_message",
            description: "Send a message to another role or broadcast to all roles.",
            input_schema: schema::<SendMessageInput>(),
        },
        ToolDefinition {
            name: "request_help",
            description: "Request human intervention, another agent's help, or clarification.",
            input_schema: schema::<RequestHelpInput>(),
        },
        ToolDefinition {
            name: "complete",
            description: "Report this role's work as complete with its final artifacts.",
            input_schema: schema::<CompleteInput>(),
        },
    ]
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
