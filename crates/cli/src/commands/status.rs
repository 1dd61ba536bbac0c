// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apmasctl status`: project phase and a one-line-per-role summary.

use std::path::PathBuf;

use anyhow::Result;

use crate::output::{format_time_ago, OutputFormat};

pub fn handle(data_dir: &PathBuf, format: OutputFormat) -> Result<()> {
    let store = super::open_store(data_dir)?;
    let project = store.project();
    let agents = store.agents();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "project": project.as_ref().map(|p| serde_json::json!({
                        "name": p.name,
                        "phase": p.phase.to_string(),
                        "working_directory": p.working_directory,
                    })),
                    "agent_count": agents.len(),
                    "escalated": agents.iter().filter(|a| a.status == apmas_core::AgentStatus::Escalated).count(),
                }))?
            );
        }
        OutputFormat::Text => match project {
            Some(project) => {
                println!("project: {} [{}]", project.name, project.phase);
                println!("working directory: {}", project.working_directory.display());
            }
            None => println!("project: not yet initialized"),
        },
    }

    if matches!(format, OutputFormat::Text) {
        println!();
        if agents.is_empty() {
            println!("no roles registered");
        }
        for agent in &agents {
            println!(
                "  {:<20} {:<12} last seen {}",
                agent.role,
                agent.status.to_string(),
                format_time_ago(agent.last_heartbeat_ms.unwrap_or(0))
            );
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
