// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool Surface verb handlers (§4.7): one module per verb, each a pure
//! function of `&AppState<C>` and the verb's `apmas-wire` input type.
//!
//! Every handler that carries an identifiable acting role calls
//! `Supervisor::record_heartbeat` on success — "any tool call counts, per
//! §4.3" is implemented once, here, rather than duplicated per verb.

pub mod checkpoint;
pub mod complete;
pub mod get_context;
pub mod heartbeat;
pub mod report_status;
pub mod request_help;
pub mod send_message;

use apmas_core::{AgentState, Clock, DomainError, Role};
use apmas_storage::{StateStore, StorageError};

use crate::state::AppState;

/// Any storage fault crossing the Tool Surface boundary is reported as the
/// single `StorageUnavailable` kind (§7) — callers never see WAL internals.
fn storage_err(_: StorageError) -> DomainError {
    DomainError::StorageUnavailable
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, DomainError> {
    Role::new(raw).map_err(|_| DomainError::UnknownRole { role: raw.to_string() })
}

fn parse_from_role(raw: &str) -> Result<Role, DomainError> {
    Role::new(raw).map_err(|_| DomainError::UnknownFromRole { role: raw.to_string() })
}

fn require_agent(store: &StateStore, role: &Role) -> Result<AgentState, DomainError> {
    store.agent(role).ok_or_else(|| DomainError::UnknownRole { role: role.to_string() })
}

fn require_from_agent(store: &StateStore, role: &Role) -> Result<AgentState, DomainError> {
    store.agent(role).ok_or_else(|| DomainError::UnknownFromRole { role: role.to_string() })
}

async fn record_heartbeat<C: Clock>(state: &AppState<C>, role: Role, now: u64) {
    state.supervisor.lock().await.record_heartbeat(role, now);
}

#[cfg(test)]
pub(crate) mod test_support {
    use apmas_core::{FakeClock, Role};

    use crate::config::Cli;
    use crate::state::AppState;
    use clap::Parser;

    /// A one-role Roster (`architect`, no dependencies) over a temp-dir
    /// State Store and a `FakeClock`, for tool-handler unit tests.
    pub fn app_state(dir: &tempfile::TempDir) -> AppState<FakeClock> {
        let toml_path = dir.path().join("apmas.toml");
        std::fs::write(
            &toml_path,
            r#"
            [[roster]]
            role = "architect"
            worker_kind = "agent"
            dependencies = []
            "#,
        )
        .unwrap();

        let mut cli = Cli::parse_from(["apmasd", "--config", &toml_path.to_string_lossy()]);
        cli.data_dir = Some(dir.path().join("data"));
        let config = crate::config::Config::load(cli).unwrap();
        AppState::bootstrap(config, FakeClock::new()).unwrap()
    }

    pub fn role(name: &str) -> Role {
        Role::from(name)
    }
}
