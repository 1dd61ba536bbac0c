// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apmasctl agents [--role]`: per-role detail, optionally narrowed to one role.

use std::path::PathBuf;

use anyhow::Result;

use crate::output::{format_time_ago, OutputFormat};

pub fn handle(data_dir: &PathBuf, role: Option<String>, format: OutputFormat) -> Result<()> {
    let store = super::open_store(data_dir)?;
    let agents = store.agents();
    let agents: Vec<_> = match &role {
        Some(role) => agents.into_iter().filter(|a| a.role.as_str() == role).collect(),
        None => agents,
    };

    match format {
        OutputFormat::Json => {
            let payload: Vec<_> = agents
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "role": a.role.to_string(),
                        "status": a.status.to_string(),
                        "retry_count": a.retry_count,
                        "artifacts": a.artifacts.iter().collect::<Vec<_>>(),
                        "last_message": a.last_message,
                        "last_error": a.last_error,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            if agents.is_empty() {
                println!("no matching roles");
            }
            for agent in &agents {
                println!("role: {}", agent.role);
                println!("  status: {}", agent.status);
                println!("  retries: {}", agent.retry_count);
                println!("  last heartbeat: {}", format_time_ago(agent.last_heartbeat_ms.unwrap_or(0)));
                if let Some(message) = &agent.last_message {
                    println!("  last message: {message}");
                }
                if let Some(error) = &agent.last_error {
                    println!("  last error: {error}");
                }
                if !agent.artifacts.is_empty() {
                    println!("  artifacts: {}", agent.artifacts.iter().cloned().collect::<Vec<_>>().join(", "));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
