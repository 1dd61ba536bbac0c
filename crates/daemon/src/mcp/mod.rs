// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Tool Surface's MCP transport (C6, §4.7, §4.7a, §4.7b): an
//! `rmcp::ServerHandler` exposing the seven tool verbs and the three
//! read-only resources over SSE.
//!
//! Grounded on `SecBear-neuron/agent-mcp/src/server.rs`'s `McpServer` —
//! same `ServerHandler` shape, same `definition_to_rmcp_tool` conversion —
//! generalized from its generic `ToolRegistry` dispatch to this daemon's
//! seven fixed verbs. `initialize`/uninitialized-connection gating
//! (§6.1a) is handled by `rmcp`'s own connection lifecycle, not
//! hand-rolled here.

mod resources;

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use apmas_core::{Clock, DomainError};
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool as RmcpTool, ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};
use serde_json::Value;

use crate::state::AppState;
use crate::tools;

pub use resources::ResourceHost;

/// Wraps `AppState` as an MCP server; one instance serves every connection
/// (`rmcp`'s transport clones/shares it per-session as its transport
/// requires).
pub struct ToolSurface<C: Clock> {
    state: Arc<AppState<C>>,
}

impl<C: Clock> Clone for ToolSurface<C> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone() }
    }
}

impl<C: Clock> ToolSurface<C> {
    pub fn new(state: Arc<AppState<C>>) -> Self {
        Self { state }
    }

    fn definition_to_rmcp_tool(def: &apmas_wire::ToolDefinition) -> RmcpTool {
        let input_schema = match &def.input_schema {
            Value::Object(map) => Arc::new(map.clone()),
            _ => Arc::new(serde_json::Map::new()),
        };

        RmcpTool {
            name: Cow::Borrowed(def.name),
            title: None,
            description: Some(Cow::Borrowed(def.description)),
            input_schema,
            output_schema: None,
            annotations: None,
            execution: None,
            icons: None,
            meta: None,
        }
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, DomainError> {
        macro_rules! verb {
            ($handler:path) => {{
                let input = serde_json::from_value(arguments).map_err(|_| DomainError::InvalidType { message_type: name.to_string() })?;
                let output = $handler(&self.state, input).await?;
                serde_json::to_value(output).map_err(|_| DomainError::StorageUnavailable)
            }};
        }

        match name {
            "heartbeat" => verb!(tools::heartbeat::handle),
            "report_status" => verb!(tools::report_status::handle),
            "checkpoint" => verb!(tools::checkpoint::handle),
            "get_context" => verb!(tools::get_context::handle),
            "send_message" => verb!(tools::send_message::handle),
            "request_help" => verb!(tools::request_help::handle),
            "complete" => verb!(tools::complete::handle),
            _ => Err(DomainError::InvalidType { message_type: name.to_string() }),
        }
    }
}

fn error_result(error: &DomainError) -> CallToolResult {
    let payload = serde_json::to_value(error).unwrap_or_else(|_| serde_json::json!({"kind": "storage_unavailable"}));
    CallToolResult {
        content: vec![Content::text(payload.to_string())],
        structured_content: Some(payload),
        is_error: Some(true),
        meta: None,
    }
}

impl<C: Clock + 'static> ServerHandler for ToolSurface<C> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: Some(false) }),
                resources: Some(resources::capability()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "apmasd".to_string(),
                title: Some("APMAS orchestrator daemon".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some("Worker-facing tool surface for the APMAS orchestrator.".to_string()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        async {
            let tools: Vec<RmcpTool> = apmas_wire::definition::tool_definitions().iter().map(Self::definition_to_rmcp_tool).collect();
            Ok(ListToolsResult::with_all_items(tools))
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let name = request.name.to_string();
            let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Object(serde_json::Map::new()));

            match self.dispatch(&name, arguments).await {
                Ok(output) => Ok(CallToolResult {
                    content: vec![Content::text(output.to_string())],
                    structured_content: Some(output),
                    is_error: None,
                    meta: None,
                }),
                Err(error) => Ok(error_result(&error)),
            }
        }
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<rmcp::model::ListResourcesResult, ErrorData>> + Send + '_ {
        async { Ok(resources::list_result(self)) }
    }

    fn read_resource(
        &self,
        request: rmcp::model::ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<rmcp::model::ReadResourceResult, ErrorData>> + Send + '_ {
        async move { resources::read_result(self, &request) }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
