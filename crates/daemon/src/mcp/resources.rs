// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three read-only MCP resources of §4.7b: `project/state`,
//! `messages/{role}`, `checkpoints/{role}`.
//!
//! No file in the retrieval pack exercises `rmcp`'s resources half of
//! `ServerHandler` directly (the one grounding file for this server,
//! `agent-mcp/src/server.rs`, only implements `list_tools`/`call_tool`) —
//! this module is built by extrapolating the same descriptor-then-read
//! shape from that file's tools half onto `rmcp::model`'s resource types.
//! Recorded in DESIGN.md as the one part of the daemon without a direct
//! worked example to copy.

use apmas_core::Clock;
use apmas_wire::{
    checkpoint_resource_uri, messages_resource_uri, CheckpointResource, CheckpointSnapshot,
    MessagesResource, ProjectStateResource, PROJECT_STATE_URI,
};
use rmcp::model::{
    ErrorData, ListResourcesResult, RawResource, ReadResourceRequestParam, ReadResourceResult,
    Resource, ResourceContents, ResourcesCapability,
};
use serde::Serialize;

use super::ToolSurface;
use crate::tools::get_context::{agent_snapshot, message_snapshot};

pub fn capability() -> ResourcesCapability {
    ResourcesCapability { subscribe: Some(false), list_changed: Some(false) }
}

/// Extension trait so `ToolSurface`'s `resources`/`read_resource` bodies
/// live in this module without widening `mod.rs`'s imports.
pub trait ResourceHost {
    fn resource_descriptors(&self) -> Vec<Resource>;
    fn read(&self, uri: &str) -> Result<String, ErrorData>;
}

fn text_resource(uri: &str, name: &str, description: &str) -> Resource {
    Resource::new(
        RawResource {
            uri: uri.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            mime_type: Some("application/json".to_string()),
            size: None,
        },
        None,
    )
}

fn to_json(uri: &str, value: &impl Serialize) -> Result<String, ErrorData> {
    serde_json::to_string(value).map_err(|err| ErrorData::internal_error(format!("failed to serialize resource {uri}: {err}"), None))
}

impl<C: Clock> ResourceHost for ToolSurface<C> {
    fn resource_descriptors(&self) -> Vec<Resource> {
        let mut resources = vec![text_resource(PROJECT_STATE_URI, "project/state", "Current project and agent roster state.")];

        for agent in self.state.store.agents() {
            let role = agent.role.to_string();
            resources.push(text_resource(&messages_resource_uri(&role), &format!("messages/{role}"), "Messages addressed to this role."));
            resources.push(text_resource(&checkpoint_resource_uri(&role), &format!("checkpoints/{role}"), "Latest stored checkpoint for this role."));
        }

        resources
    }

    fn read(&self, uri: &str) -> Result<String, ErrorData> {
        if uri == PROJECT_STATE_URI {
            let project = self.state.store.project().ok_or_else(|| ErrorData::invalid_params("no project initialized", None))?;
            let agents = self.state.store.agents().iter().map(agent_snapshot).collect();
            let resource = ProjectStateResource {
                project: apmas_wire::ProjectSnapshot {
                    name: project.name,
                    working_directory: project.working_directory.to_string_lossy().into_owned(),
                    phase: project.phase.to_string(),
                },
                agents,
            };
            return to_json(uri, &resource);
        }

        if let Some(role_name) = uri.strip_prefix("messages/") {
            let role = crate::tools::parse_role(role_name).map_err(|err| ErrorData::invalid_params(err.to_string(), None))?;
            let messages = self.state.store.messages_for(&role).iter().map(message_snapshot).collect();
            let resource = MessagesResource { role: role_name.to_string(), messages };
            return to_json(uri, &resource);
        }

        if let Some(role_name) = uri.strip_prefix("checkpoints/") {
            let role = crate::tools::parse_role(role_name).map_err(|err| ErrorData::invalid_params(err.to_string(), None))?;
            let checkpoint = self.state.store.latest_checkpoint(&role).map(|c| CheckpointSnapshot {
                summary: c.summary,
                completed_items: c.completed_items,
                pending_items: c.pending_items,
                percent_complete: c.percent_complete(),
            });
            let resource = CheckpointResource { role: role_name.to_string(), checkpoint };
            return to_json(uri, &resource);
        }

        Err(ErrorData::invalid_params(format!("unknown resource uri: {uri}"), None))
    }
}

pub(super) fn list_result<C: Clock>(host: &ToolSurface<C>) -> ListResourcesResult {
    ListResourcesResult { resources: host.resource_descriptors(), next_cursor: None }
}

pub(super) fn read_result<C: Clock>(host: &ToolSurface<C>, request: &ReadResourceRequestParam) -> Result<ReadResourceResult, ErrorData> {
    let text = host.read(&request.uri)?;
    Ok(ReadResourceResult { contents: vec![ResourceContents::text(text, request.uri.clone())] })
}
