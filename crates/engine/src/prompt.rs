// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prompt synthesis (§6.5): assembles the document handed to a worker's
//! stdin on launch from three parts — a per-role template keyed by the
//! Roster entry's `prompt_kind`, the project's name and working directory,
//! and the recovery-context, if the role is being relaunched after a retry.
//!
//! The exact template copy is explicitly out of scope (it's "external to the
//! core" per the specification); what belongs here is the shape a
//! [REDESIGN FLAG] calls for — a tagged variant over prompt kinds, each one
//! a pure function from `(project, recovery-context)` to text — rather than
//! an inheritance hierarchy of template classes.

use apmas_core::{Project, Role};

/// The closed set of per-role prompt templates a Roster entry can select via
/// its `prompt_kind` field. An unrecognized or absent kind falls back to
/// [`PromptKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Generic,
    Architect,
    Developer,
    Reviewer,
    Tester,
}

impl PromptKind {
    pub fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("architect") => PromptKind::Architect,
            Some("developer") => PromptKind::Developer,
            Some("reviewer") => PromptKind::Reviewer,
            Some("tester") => PromptKind::Tester,
            _ => PromptKind::Generic,
        }
    }

    fn role_brief(&self) -> &'static str {
        match self {
            PromptKind::Generic => {
                "You are one worker in a multi-agent build. Report progress via heartbeat and \
                 report_status, and call complete when your role's work is done."
            }
            PromptKind::Architect => {
                "You are the architect. Design the system's structure and record key decisions \
                 before any implementation role depends on your output."
            }
            PromptKind::Developer => {
                "You are a developer. Implement the work assigned to your role, checkpointing \
                 progress as you complete discrete units of work."
            }
            PromptKind::Reviewer => {
                "You are a reviewer. Examine the artifacts produced by roles you depend on and \
                 report approved or changes_requested via send_message."
            }
            PromptKind::Tester => {
                "You are a tester. Exercise the artifacts produced by roles you depend on and \
                 report defects via send_message."
            }
        }
    }
}

/// Render the full prompt document for `role` launching under `project`,
/// given `recovery_context` if this is a relaunch after a retry (§4.4).
pub fn render(role: &Role, kind: PromptKind, project: &Project, recovery_context: Option<&str>) -> String {
    let mut doc = String::new();
    doc.push_str(kind.role_brief());
    doc.push_str("\n\n");
    doc.push_str(&format!("project: {}\n", project.name));
    doc.push_str(&format!("working directory: {}\n", project.working_directory.display()));
    doc.push_str(&format!("role: {role}\n"));
    if let Some(context) = recovery_context {
        doc.push('\n');
        doc.push_str(context);
    }
    doc
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
