// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The static, declarative Roster (C2): role -> (worker kind, dependencies,
//! timeout override, prompt kind), validated once at startup (§3).

use std::collections::HashSet;

use crate::role::Role;

/// One Roster entry, read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RosterEntry {
    pub role: Role,
    pub worker_kind: String,
    pub dependencies: Vec<Role>,
    pub timeout_override_ms: Option<u64>,
    pub description: Option<String>,
    pub prompt_kind: Option<String>,
}

/// The full declarative dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

/// A Roster invariant violation (§3).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("duplicate role name: {0}")]
    DuplicateRole(String),
    #[error("role {role} declares unknown dependency {dependency}")]
    UnknownDependency { role: String, dependency: String },
    #[error("role {0} lists itself as a dependency")]
    SelfDependency(String),
    #[error("dependency graph contains a cycle involving role {0}")]
    CyclicDependency(String),
    #[error("role {role} has unrecognized worker kind {worker_kind}")]
    UnknownWorkerKind { role: String, worker_kind: String },
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, role: &Role) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| &e.role == role)
    }

    /// Roles in declaration order, used for scheduling tie-breaks (§4.8).
    pub fn declaration_order(&self) -> impl Iterator<Item = &Role> {
        self.entries.iter().map(|e| &e.role)
    }

    /// Validate all Roster invariants from §3. `allowed_worker_kinds` is the
    /// closed set declared in configuration.
    pub fn validate(&self, allowed_worker_kinds: &HashSet<String>) -> Result<(), RosterError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.role.clone()) {
                return Err(RosterError::DuplicateRole(entry.role.to_string()));
            }
        }

        for entry in &self.entries {
            if !allowed_worker_kinds.contains(&entry.worker_kind) {
                return Err(RosterError::UnknownWorkerKind {
                    role: entry.role.to_string(),
                    worker_kind: entry.worker_kind.clone(),
                });
            }
            for dep in &entry.dependencies {
                if dep == &entry.role {
                    return Err(RosterError::SelfDependency(entry.role.to_string()));
                }
                if !seen.contains(dep) {
                    return Err(RosterError::UnknownDependency {
                        role: entry.role.to_string(),
                        dependency: dep.to_string(),
                    });
                }
            }
        }

        self.check_acyclic()
    }

    /// DFS-based cycle detection; the Roster must be a DAG (§3).
    fn check_acyclic(&self) -> Result<(), RosterError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        let mut marks: std::collections::HashMap<&Role, Mark> = std::collections::HashMap::new();

        fn visit<'a>(
            roster: &'a Roster,
            role: &'a Role,
            marks: &mut std::collections::HashMap<&'a Role, Mark>,
        ) -> Result<(), RosterError> {
            match marks.get(role) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => return Err(RosterError::CyclicDependency(role.to_string())),
                None => {}
            }
            marks.insert(role, Mark::Visiting);
            if let Some(entry) = roster.get(role) {
                for dep in &entry.dependencies {
                    visit(roster, dep, marks)?;
                }
            }
            marks.insert(role, Mark::Done);
            Ok(())
        }

        for entry in &self.entries {
            visit(self, &entry.role, &mut marks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
