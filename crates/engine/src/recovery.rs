// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recovery Policy (C4, §4.4): the three-step retry-then-escalate ladder
//! applied to every `TimedOut`, `Failed`, or `Paused` role during the
//! Supervisor's recovery sweep.
//!
//! Grounded on `crates/daemon/src/engine/decision.rs`'s
//! `EscalationDecisionBuilder` — a trigger goes in, a structured decision
//! comes out. The teacher builds a `DecisionCreated` event offering a human
//! several options; this specification has no human in the loop, so the
//! builder instead produces the next deterministic step of the ladder.

use apmas_core::{AgentStatus, Checkpoint};

/// The recovery action computed for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryOutcome {
    pub new_status: AgentStatus,
    pub new_retry_count: u32,
    /// The resume document to seed the next launch's prompt, when
    /// `new_status` is `Queued`. `None` when escalating.
    pub recovery_context: Option<String>,
    /// Set only when `new_status == Escalated`; the Supervisor logs this and
    /// passes it to the configured `NotifySink`.
    pub escalation_summary: Option<String>,
}

/// Builds a [`RecoveryOutcome`] for one role, following §4.4 exactly:
///
/// 1. `retry-count` 0 -> 1: resume with the full checkpoint context.
/// 2. `retry-count` 1 -> 2: resume with reduced scope — only the smallest
///    atomic pending subtask from the latest checkpoint.
/// 3. The retry that would reach `MaxRetries`: escalate instead of retrying
///    again, regardless of which numbered step it would otherwise be.
///
/// `Paused` roles always take path 1, unconditionally, per §4.8's recovery
/// sweep note — a context-limit pause is not a failure and never counts
/// toward escalation.
pub struct RecoveryDecisionBuilder<'a> {
    status: AgentStatus,
    retry_count: u32,
    max_retries: u32,
    checkpoint: Option<&'a Checkpoint>,
}

impl<'a> RecoveryDecisionBuilder<'a> {
    pub fn new(
        status: AgentStatus,
        retry_count: u32,
        max_retries: u32,
        checkpoint: Option<&'a Checkpoint>,
    ) -> Self {
        Self {
            status,
            retry_count,
            max_retries,
            checkpoint,
        }
    }

    pub fn build(self) -> RecoveryOutcome {
        if self.status == AgentStatus::Paused {
            return self.full_resume();
        }

        let next_retry_count = self.retry_count.saturating_add(1);
        if next_retry_count >= self.max_retries {
            return RecoveryOutcome {
                new_status: AgentStatus::Escalated,
                new_retry_count: next_retry_count,
                recovery_context: None,
                escalation_summary: Some(format!(
                    "escalated after {next_retry_count} retries (max {})",
                    self.max_retries
                )),
            };
        }

        if self.retry_count == 0 {
            self.full_resume()
        } else {
            self.reduced_scope()
        }
    }

    fn full_resume(&self) -> RecoveryOutcome {
        let doc = self
            .checkpoint
            .map(Checkpoint::resume_document)
            .unwrap_or_else(apmas_core::no_checkpoint_sentinel);
        RecoveryOutcome {
            new_status: AgentStatus::Queued,
            new_retry_count: self.retry_count.saturating_add(1),
            recovery_context: Some(doc),
            escalation_summary: None,
        }
    }

    fn reduced_scope(&self) -> RecoveryOutcome {
        let doc = match self.checkpoint.and_then(|c| c.pending_items.first()) {
            Some(item) => format!(
                "--- resuming with reduced scope ---\nComplete only this subtask, nothing else: {item}\n"
            ),
            None => apmas_core::no_checkpoint_sentinel(),
        };
        RecoveryOutcome {
            new_status: AgentStatus::Queued,
            new_retry_count: self.retry_count.saturating_add(1),
            recovery_context: Some(doc),
            escalation_summary: None,
        }
    }
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
