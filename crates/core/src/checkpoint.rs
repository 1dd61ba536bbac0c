// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint records: per-role progress snapshots (§3, §4.5).

use crate::define_id;
use crate::role::Role;

define_id! {
    /// Unique identifier for one stored checkpoint.
    pub struct CheckpointId("ckp-");
}

/// A checkpoint's completed/pending counts are inconsistent with its item lists.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "invalid checkpoint: completed_count ({completed_count}) + pending items ({pending_len}) != total_count ({total_count})"
)]
pub struct InvalidCheckpoint {
    pub completed_count: u32,
    pub pending_len: usize,
    pub total_count: u32,
}

/// One stored progress snapshot for a role. Many per role; latest wins for recovery.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub role: Role,
    pub created_at_ms: u64,
    pub summary: String,
    pub completed_items: Vec<String>,
    pub pending_items: Vec<String>,
    pub active_files: Vec<String>,
    pub notes: Option<String>,
    pub completed_count: u32,
    pub total_count: u32,
}

impl Checkpoint {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        role: Role,
        created_at_ms: u64,
        summary: impl Into<String>,
        completed_items: Vec<String>,
        pending_items: Vec<String>,
        active_files: Vec<String>,
        notes: Option<String>,
        total_count: u32,
    ) -> Result<Self, InvalidCheckpoint> {
        let completed_count = completed_items.len() as u32;
        let checkpoint = Self {
            id: CheckpointId::new(),
            role,
            created_at_ms,
            summary: summary.into(),
            completed_items,
            pending_items,
            active_files,
            notes,
            completed_count,
            total_count,
        };
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Enforces `completed_count + |pending| == total_count` (§3, I5).
    pub fn validate(&self) -> Result<(), InvalidCheckpoint> {
        if self.completed_count as usize + self.pending_items.len() == self.total_count as usize {
            Ok(())
        } else {
            Err(InvalidCheckpoint {
                completed_count: self.completed_count,
                pending_len: self.pending_items.len(),
                total_count: self.total_count,
            })
        }
    }

    /// Percentage complete, `0.0..=100.0`. A checkpoint with `total_count == 0`
    /// has nothing left to do and reports 100%.
    pub fn percent_complete(&self) -> f64 {
        if self.total_count == 0 {
            100.0
        } else {
            (self.completed_count as f64 / self.total_count as f64) * 100.0
        }
    }

    /// Renders the resume document used to seed a worker's recovery prompt (§4.5, L1).
    ///
    /// The leading banner line lets the prompt template locate this section.
    pub fn resume_document(&self) -> String {
        let mut doc = String::new();
        doc.push_str("--- resuming from checkpoint ---\n");
        doc.push_str(&self.summary);
        doc.push('\n');
        for item in &self.completed_items {
            doc.push_str(&format!("[x] {item}\n"));
        }
        for item in &self.pending_items {
            doc.push_str(&format!("[ ] {item}\n"));
        }
        if !self.active_files.is_empty() {
            doc.push_str("active files: ");
            doc.push_str(&self.active_files.join(", "));
            doc.push('\n');
        }
        if let Some(notes) = &self.notes {
            doc.push_str("notes: ");
            doc.push_str(notes);
            doc.push('\n');
        }
        doc
    }
}

/// The sentinel resume document used when a role has no prior checkpoint (§4.5, B3).
pub fn no_checkpoint_sentinel() -> String {
    "no previous checkpoint; start fresh".to_string()
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
