// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the worker-facing Tool Surface (§4.7, §6.1).
//!
//! This crate has no I/O of its own — it defines the JSON-shaped
//! request/response payload for each tool verb, a `schemars`-derived input
//! schema per verb for MCP tool registration, and the resource payload
//! types read via `project/state`, `messages/{role}`, and
//! `checkpoints/{role}`. `apmas-daemon` is the only crate that talks MCP;
//! it deserializes these types from tool-call arguments, drives
//! `apmas-engine`/`apmas-storage`, and serializes these types back as the
//! `CallToolResult` content.
//!
//! Tool-surface errors are `apmas_core::DomainError` — already the closed,
//! serializable taxonomy §7 describes — so this crate does not define a
//! second one; see [`apmas_core::DomainError`].

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod checkpoint;
pub mod complete;
pub mod definition;
pub mod get_context;
pub mod heartbeat;
pub mod report_status;
pub mod request_help;
pub mod resources;
pub mod send_message;

pub use checkpoint::{CheckpointInput, CheckpointOutput};
pub use complete::{CompleteInput, CompleteOutput};
pub use definition::ToolDefinition;
pub use get_context::{
    AgentSnapshot, GetContextInput, GetContextOutput, IncludeSection, MessageSnapshot,
    ProjectSnapshot,
};
pub use heartbeat::{Activity, HeartbeatInput, HeartbeatOutput};
pub use report_status::{ReportStatusInput, ReportStatusOutput, WorkerStatus};
pub use request_help::{HelpKind, RequestHelpInput, RequestHelpOutput};
pub use resources::{
    checkpoint_resource_uri, messages_resource_uri, CheckpointResource, CheckpointSnapshot,
    MessagesResource, ProjectStateResource, PROJECT_STATE_URI,
};
pub use send_message::{MessageKind, SendMessageInput, SendMessageOutput, ToRoleWire};
