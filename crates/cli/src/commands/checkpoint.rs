// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apmasctl checkpoint <role>`: the latest stored checkpoint for one role.

use std::path::PathBuf;

use anyhow::{Context, Result};
use apmas_core::Role;

use crate::output::OutputFormat;

pub fn handle(data_dir: &PathBuf, role: &str, format: OutputFormat) -> Result<()> {
    let store = super::open_store(data_dir)?;
    let role = Role::new(role).with_context(|| format!("invalid role name: {role}"))?;
    let checkpoint = store.latest_checkpoint(&role);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&checkpoint.as_ref().map(|c| {
                    serde_json::json!({
                        "summary": c.summary,
                        "completed_items": c.completed_items,
                        "pending_items": c.pending_items,
                        "percent_complete": c.percent_complete(),
                        "active_files": c.active_files,
                        "notes": c.notes,
                    })
                }))?
            );
        }
        OutputFormat::Text => match checkpoint {
            Some(checkpoint) => {
                println!("{:.0}% complete: {}", checkpoint.percent_complete(), checkpoint.summary);
                for item in &checkpoint.completed_items {
                    println!("  [x] {item}");
                }
                for item in &checkpoint.pending_items {
                    println!("  [ ] {item}");
                }
                if let Some(notes) = &checkpoint.notes {
                    println!("notes: {notes}");
                }
            }
            None => println!("{}", apmas_core::no_checkpoint_sentinel()),
        },
    }

    Ok(())
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
