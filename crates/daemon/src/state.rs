// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-wide shared state: the State Store, the Supervisor, and the
//! Checkpoint Engine, bootstrapped once at startup and handed to every tool
//! handler behind an `Arc`.
//!
//! Generic only over `Clock` (not the launcher/notify sink) so daemon-level
//! tests can swap in `FakeClock` for deterministic timestamps while still
//! using the real `ProcessLauncher`/`CompositeNotifySink` types — those
//! types are inert until `Supervisor::tick`/`launch` actually run, which
//! handler-level tests never need to do.

use std::collections::HashSet;
use std::sync::Arc;

use apmas_core::{Clock, StateEvent, SystemClock};
use apmas_engine::{roster_validate, CheckpointEngine, Supervisor};
use apmas_storage::{StateStore, StorageError};
use tokio::sync::Mutex;

use crate::config::{allowed_worker_kinds, Config};
use crate::launcher::ProcessLauncher;
use crate::notify::CompositeNotifySink;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("roster failed validation: {0}")]
    Roster(#[from] apmas_core::RosterError),
}

pub type DaemonSupervisor<C> = Supervisor<ProcessLauncher, Arc<CompositeNotifySink>, C>;

pub struct AppState<C: Clock = SystemClock> {
    pub store: Arc<StateStore>,
    pub supervisor: Arc<Mutex<DaemonSupervisor<C>>>,
    pub checkpoints: CheckpointEngine,
    pub clock: C,
    pub config: Arc<Config>,
}

impl<C: Clock> AppState<C> {
    /// Opens the State Store at `config.data_dir`, seeds the Project and
    /// Roster on a fresh store (idempotent: a store that already has a
    /// Project is assumed already bootstrapped), and constructs the
    /// Supervisor.
    pub fn bootstrap(config: Config, clock: C) -> Result<Self, BootstrapError> {
        let store = Arc::new(StateStore::open(&config.data_dir)?);

        if store.project().is_none() {
            let now = clock.epoch_ms();
            store.commit(StateEvent::ProjectInitialized {
                name: config.project_name.clone(),
                working_directory: config.working_directory.clone(),
                at_ms: now,
            })?;

            let allowed: HashSet<String> = allowed_worker_kinds();
            let initial = roster_validate::initialize(&config.roster, &allowed)?;
            for agent in initial {
                store.commit(StateEvent::AgentRegistered {
                    role: agent.role,
                    worker_kind: agent.worker_kind,
                    dependencies: agent.dependencies,
                })?;
            }
        }

        let launcher = ProcessLauncher::new(config.worker_command.clone());
        let notify = Arc::new(CompositeNotifySink::new(config.webhook_url.as_deref()));
        let supervisor = Supervisor::new(
            store.clone(),
            config.roster.clone(),
            config.supervisor_config(),
            launcher,
            notify,
            clock.clone(),
        );
        let checkpoints = CheckpointEngine::new(store.clone());

        Ok(Self {
            store,
            supervisor: Arc::new(Mutex::new(supervisor)),
            checkpoints,
            clock,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
