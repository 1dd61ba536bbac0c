// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Supervisor Loop (C8, §4.8): the top-level periodic coordinator that
//! drives every role through its lifecycle.
//!
//! Grounded on the teacher's `Runtime<A, N, C: Clock>` — generic over the
//! action/launcher dependency, the notifier, and the clock so tests can
//! swap in fakes for all three. Each tick runs the five sweeps in the exact
//! order §4.8 specifies; within one sweep a role advances at most one
//! lifecycle step, matching "no fast-forwarding through states in one
//! tick."

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use apmas_core::{
    AgentState, AgentStatus, Clock, DomainError, Project, ProjectPhase, Role, Roster, StateEvent,
};
use apmas_storage::StateStore;
use std::sync::Arc;

use crate::error::RuntimeError;
use crate::heartbeat::HeartbeatTracker;
use crate::launcher::{ExitReport, WorkerLauncher};
use crate::notify::{Notification, NotifySink};
use crate::prompt::{self, PromptKind};
use crate::recovery::RecoveryDecisionBuilder;
use crate::roster_validate;

/// Tunables from the configuration surface (§6.3, §6.3a). Durations that are
/// compared against `Clock::epoch_ms` are kept in milliseconds to avoid a
/// conversion at every comparison; `polling_interval` and
/// `graceful_shutdown_timeout` are real-time waits owned by the caller's
/// event loop, not by the Supervisor itself, so they stay as `Duration`.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub polling_interval: Duration,
    pub heartbeat_timeout_ms: u64,
    /// Grace window for a `Spawning` role that hasn't yet sent its first
    /// heartbeat. Not an independently configured key in §6.3 — the
    /// specification names it without giving it a config surface, so it
    /// defaults to `heartbeat_timeout_ms` (see DESIGN.md).
    pub spawning_grace_ms: u64,
    pub default_timeout_ms: u64,
    pub max_retries: u32,
    pub graceful_shutdown_timeout: Duration,
    pub max_concurrent_launches: Option<usize>,
    /// Open Question resolution (§9 / DESIGN.md): whether an `Escalated`
    /// role also fails the whole project, versus letting the rest of the
    /// graph run to whatever completion it can reach.
    pub fail_project_on_escalation: bool,
}

impl SupervisorConfig {
    pub fn new(heartbeat_timeout_ms: u64, default_timeout_ms: u64, max_retries: u32) -> Self {
        Self {
            polling_interval: Duration::from_secs(5),
            heartbeat_timeout_ms,
            spawning_grace_ms: heartbeat_timeout_ms,
            default_timeout_ms,
            max_retries,
            graceful_shutdown_timeout: Duration::from_secs(10),
            max_concurrent_launches: None,
            fail_project_on_escalation: false,
        }
    }
}

/// The Supervisor: one per run, owning the only write path into lifecycle
/// transitions that isn't a direct Tool Surface verb.
pub struct Supervisor<L: WorkerLauncher, N: NotifySink, C: Clock> {
    store: Arc<StateStore>,
    roster: Roster,
    config: SupervisorConfig,
    heartbeat: HeartbeatTracker,
    launcher: L,
    notify: N,
    clock: C,
    handles: HashMap<Role, L::Handle>,
}

impl<L: WorkerLauncher, N: NotifySink, C: Clock> Supervisor<L, N, C> {
    pub fn new(store: Arc<StateStore>, roster: Roster, config: SupervisorConfig, launcher: L, notify: N, clock: C) -> Self {
        let mut heartbeat = HeartbeatTracker::new();
        for agent in store.agents() {
            heartbeat.seed(agent.role, agent.last_heartbeat_ms);
        }
        Self {
            store,
            roster,
            config,
            heartbeat,
            launcher,
            notify,
            clock,
            handles: HashMap::new(),
        }
    }

    pub fn project_phase(&self) -> Option<ProjectPhase> {
        self.store.project().map(|p| p.phase)
    }

    /// Run one full cycle: health, recovery, scheduling, launch, completion
    /// (§4.8). Returns once every sweep has run; callers wait
    /// `config.polling_interval` before calling again.
    pub async fn tick(&mut self) -> Result<(), RuntimeError> {
        let now = self.clock.epoch_ms();
        self.health_sweep(now).await?;
        self.recovery_sweep(now).await?;
        self.scheduling_sweep(now)?;
        self.launch_sweep(now).await?;
        self.completion_check(now)?;
        Ok(())
    }

    /// Record an externally-observed heartbeat (any tool call counts, per
    /// §4.3) so the health sweep doesn't immediately mark the role stale.
    pub fn record_heartbeat(&mut self, role: Role, now_ms: u64) {
        self.heartbeat.record(role, now_ms);
    }

    /// Fires the same escalation notification the recovery sweep sends,
    /// for the Tool Surface's direct `request_help(kind=human)` escalation
    /// path (§4.7), which bypasses the sweep entirely.
    pub async fn notify_escalation(&self, role: &Role, summary: &str) {
        tracing::error!(role = %role, %summary, "role escalated via request_help");
        self.notify
            .notify(Notification {
                title: format!("{role} escalated"),
                body: summary.to_string(),
            })
            .await;
    }

    fn transition(&self, role: &Role, from: AgentStatus, to: AgentStatus, now_ms: u64) -> Result<(), RuntimeError> {
        if !from.is_legal_transition(to) {
            tracing::warn!(role = %role, from = %from, to = %to, "illegal transition suppressed");
            return Err(RuntimeError::IllegalTransition {
                role: role.clone(),
                from,
                to,
            });
        }
        self.store.commit(StateEvent::AgentStatusChanged {
            role: role.clone(),
            status: to,
            at_ms: now_ms,
        })?;
        Ok(())
    }

    async fn health_sweep(&mut self, now: u64) -> Result<(), RuntimeError> {
        let agents = self.store.agents();
        for agent in &agents {
            if agent.status.is_terminal() {
                self.handles.remove(&agent.role);
                continue;
            }

            if let Some(handle) = self.handles.get(&agent.role) {
                if let Some(exit) = self.launcher.poll_exit(handle).await {
                    self.handles.remove(&agent.role);
                    if matches!(exit, ExitReport::Crashed { .. }) {
                        self.transition(&agent.role, agent.status, AgentStatus::Failed, now)?;
                        continue;
                    }
                }
            }

            match agent.status {
                AgentStatus::Running => {
                    if self
                        .heartbeat
                        .staleness(&agent.role, now, self.config.heartbeat_timeout_ms, agent.timeout_at_ms)
                        .is_some()
                    {
                        self.transition(&agent.role, AgentStatus::Running, AgentStatus::TimedOut, now)?;
                    }
                }
                AgentStatus::Spawning => {
                    let deadline = agent.spawned_at_ms.map(|t| t + self.config.spawning_grace_ms);
                    if deadline.is_some_and(|d| now > d) {
                        self.transition(&agent.role, AgentStatus::Spawning, AgentStatus::Failed, now)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    async fn recovery_sweep(&mut self, now: u64) -> Result<(), RuntimeError> {
        let agents = self.store.agents();
        for agent in &agents {
            if !matches!(agent.status, AgentStatus::TimedOut | AgentStatus::Failed | AgentStatus::Paused) {
                continue;
            }

            let checkpoint = self.store.latest_checkpoint(&agent.role);
            let outcome = RecoveryDecisionBuilder::new(agent.status, agent.retry_count, self.config.max_retries, checkpoint.as_ref()).build();

            if !agent.status.is_legal_transition(outcome.new_status) {
                tracing::warn!(
                    role = %agent.role,
                    from = %agent.status,
                    to = %outcome.new_status,
                    "recovery policy produced an illegal transition; skipping"
                );
                continue;
            }

            self.store.commit(StateEvent::AgentStatusChanged {
                role: agent.role.clone(),
                status: outcome.new_status,
                at_ms: now,
            })?;
            self.store.commit(StateEvent::AgentRetryIncremented {
                role: agent.role.clone(),
                retry_count: outcome.new_retry_count,
            })?;
            self.store.commit(StateEvent::AgentRecoveryContextSet {
                role: agent.role.clone(),
                context: outcome.recovery_context.clone(),
            })?;

            if outcome.new_status == AgentStatus::Escalated {
                let summary = outcome.escalation_summary.clone().unwrap_or_default();
                tracing::error!(role = %agent.role, %summary, "role escalated");
                self.notify
                    .notify(Notification {
                        title: format!("{} escalated", agent.role),
                        body: summary,
                    })
                    .await;
            }
        }
        Ok(())
    }

    fn scheduling_sweep(&mut self, now: u64) -> Result<(), RuntimeError> {
        let agents = self.store.agents();
        let completed: HashSet<Role> = agents
            .iter()
            .filter(|a| a.status == AgentStatus::Completed)
            .map(|a| a.role.clone())
            .collect();

        for agent in &agents {
            if agent.status != AgentStatus::Pending {
                continue;
            }
            if roster_validate::dependencies_satisfied(&agent.role, &self.roster, |r| completed.contains(r)) {
                self.transition(&agent.role, AgentStatus::Pending, AgentStatus::Queued, now)?;
            }
        }
        Ok(())
    }

    async fn launch_sweep(&mut self, now: u64) -> Result<(), RuntimeError> {
        let project = match self.store.project() {
            Some(project) => project,
            None => return Err(RuntimeError::Domain(DomainError::NotInitialized)),
        };

        let agents: HashMap<Role, AgentState> = self.store.agents().into_iter().map(|a| (a.role.clone(), a)).collect();
        let order: Vec<Role> = self.roster.declaration_order().cloned().collect();
        let limit = self.config.max_concurrent_launches.unwrap_or(usize::MAX);

        let mut launched = 0usize;
        for role in order {
            if launched >= limit {
                break;
            }
            let Some(agent) = agents.get(&role) else { continue };
            if agent.status != AgentStatus::Queued {
                continue;
            }

            let entry = self.roster.get(&role);
            let kind = PromptKind::parse(entry.and_then(|e| e.prompt_kind.as_deref()));
            let doc = prompt::render(&role, kind, &project, agent.recovery_context.as_deref());

            match self.launcher.launch(&role, &doc).await {
                Ok(handle) => {
                    self.handles.insert(role.clone(), handle);
                    let timeout_ms = entry.and_then(|e| e.timeout_override_ms).unwrap_or(self.config.default_timeout_ms);
                    self.store.commit(StateEvent::AgentSpawned {
                        role: role.clone(),
                        at_ms: now,
                        timeout_at_ms: now + timeout_ms,
                    })?;
                    self.store.commit(StateEvent::AgentStatusChanged {
                        role: role.clone(),
                        status: AgentStatus::Spawning,
                        at_ms: now,
                    })?;
                    self.store.commit(StateEvent::AgentRecoveryContextSet { role: role.clone(), context: None })?;
                    self.heartbeat.record(role.clone(), now);
                    launched += 1;
                }
                Err(source) => {
                    // Left `Queued`; the next tick retries. A launch failure
                    // is not charged against the role's retry-count — that
                    // ladder is reserved for failures the worker itself causes.
                    tracing::error!(role = %role, error = %source, "worker launch failed, will retry next tick");
                }
            }
        }
        Ok(())
    }

    fn completion_check(&mut self, now: u64) -> Result<(), RuntimeError> {
        let project: Project = match self.store.project() {
            Some(project) => project,
            None => return Ok(()),
        };
        if project.phase.is_terminal() {
            return Ok(());
        }

        let agents = self.store.agents();
        if agents.is_empty() {
            return Ok(());
        }

        if agents.iter().all(|a| a.status == AgentStatus::Completed) {
            self.store.commit(StateEvent::ProjectPhaseChanged { phase: ProjectPhase::Completed, at_ms: now })?;
        } else if self.config.fail_project_on_escalation && agents.iter().any(|a| a.status == AgentStatus::Escalated) {
            self.store.commit(StateEvent::ProjectPhaseChanged { phase: ProjectPhase::Failed, at_ms: now })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
