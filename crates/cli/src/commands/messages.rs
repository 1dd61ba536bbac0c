// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apmasctl messages <role>`: messages addressed to one role (direct or broadcast).

use std::path::PathBuf;

use anyhow::{Context, Result};
use apmas_core::Role;

use crate::output::OutputFormat;

pub fn handle(data_dir: &PathBuf, role: &str, format: OutputFormat) -> Result<()> {
    let store = super::open_store(data_dir)?;
    let role = Role::new(role).with_context(|| format!("invalid role name: {role}"))?;
    let messages = store.messages_for(&role);

    match format {
        OutputFormat::Json => {
            let payload: Vec<_> = messages
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "from_role": m.from_role.to_string(),
                        "to_role": m.to_role.to_string(),
                        "type": m.message_type.to_string(),
                        "content": m.content,
                        "timestamp_ms": m.timestamp_ms,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            if messages.is_empty() {
                println!("no messages addressed to {role}");
            }
            for message in &messages {
                println!("[{}] {} -> {}: {}", message.message_type, message.from_role, message.to_role, message.content);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
