// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration surface (SPEC_FULL §6.3a): a flat TOML file merged with
//! `clap`'s `env`-derived overrides, flags > env > file > built-in default.
//!
//! Grounded on the teacher's flat-key configuration convention
//! (`crates/daemon/src/env.rs`'s `OJ_*` variable precedence chain), replayed
//! here as a `clap::Parser` struct so the same precedence falls out of
//! `clap`'s own flag/env resolution instead of being hand-rolled per key.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use apmas_core::{Roster, RosterEntry, RosterError};
use clap::Parser;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("roster failed validation: {0}")]
    InvalidRoster(#[from] RosterError),
}

/// Raw shape of the TOML config file. Every key is optional here; absent
/// keys fall back to `clap`'s own defaults/env overrides in [`Cli`].
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    polling_interval_ms: Option<u64>,
    heartbeat_interval_ms: Option<u64>,
    heartbeat_timeout_ms: Option<u64>,
    default_timeout_ms: Option<u64>,
    max_retries: Option<u32>,
    graceful_shutdown_timeout_ms: Option<u64>,
    safe_context_tokens: Option<u64>,
    tokens_per_file: Option<u64>,
    max_concurrent_launches: Option<usize>,
    fail_project_on_escalation: Option<bool>,
    data_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    bind_addr: Option<String>,
    webhook_url: Option<String>,
    worker_command: Option<String>,
    project_name: Option<String>,
    working_directory: Option<PathBuf>,
    #[serde(default)]
    roster: Vec<RosterEntry>,
}

/// Command-line flags and `clap`-derived environment overrides. Every field
/// here shadows the matching [`FileConfig`] key when present (SPEC_FULL
/// §6.3a's flags > env > file precedence).
#[derive(Debug, Parser)]
#[command(name = "apmasd", about = "APMAS orchestrator daemon")]
pub struct Cli {
    /// Path to the TOML config file (the `[[roster]]` table lives here).
    #[arg(long, env = "APMAS_CONFIG")]
    pub config: PathBuf,

    #[arg(long, env = "APMAS_POLLING_INTERVAL_MS")]
    pub polling_interval_ms: Option<u64>,
    #[arg(long, env = "APMAS_HEARTBEAT_INTERVAL_MS")]
    pub heartbeat_interval_ms: Option<u64>,
    #[arg(long, env = "APMAS_HEARTBEAT_TIMEOUT_MS")]
    pub heartbeat_timeout_ms: Option<u64>,
    #[arg(long, env = "APMAS_DEFAULT_TIMEOUT_MS")]
    pub default_timeout_ms: Option<u64>,
    #[arg(long, env = "APMAS_MAX_RETRIES")]
    pub max_retries: Option<u32>,
    #[arg(long, env = "APMAS_GRACEFUL_SHUTDOWN_TIMEOUT_MS")]
    pub graceful_shutdown_timeout_ms: Option<u64>,
    #[arg(long, env = "APMAS_SAFE_CONTEXT_TOKENS")]
    pub safe_context_tokens: Option<u64>,
    #[arg(long, env = "APMAS_TOKENS_PER_FILE")]
    pub tokens_per_file: Option<u64>,
    #[arg(long, env = "APMAS_MAX_CONCURRENT_LAUNCHES")]
    pub max_concurrent_launches: Option<usize>,
    #[arg(long, env = "APMAS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    #[arg(long, env = "APMAS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, env = "APMAS_BIND_ADDR")]
    pub bind_addr: Option<String>,
    #[arg(long, env = "APMAS_WEBHOOK_URL")]
    pub webhook_url: Option<String>,
    #[arg(long, env = "APMAS_WORKER_COMMAND")]
    pub worker_command: Option<String>,
    /// Not one of the named §6.3 keys; required to seed the Project
    /// singleton on first start (the name it is initialized with).
    #[arg(long, env = "APMAS_PROJECT_NAME")]
    pub project_name: Option<String>,
    #[arg(long, env = "APMAS_WORKING_DIRECTORY")]
    pub working_directory: Option<PathBuf>,
}

/// Fully resolved configuration: every key has a concrete value, the Roster
/// has already been validated (SPEC_FULL §6.3a: "a validation failure
/// aborts startup before any worker is launched").
#[derive(Debug, Clone)]
pub struct Config {
    pub polling_interval: Duration,
    pub heartbeat_interval_ms: u64,
    pub heartbeat_timeout_ms: u64,
    pub default_timeout_ms: u64,
    pub max_retries: u32,
    pub graceful_shutdown_timeout: Duration,
    pub safe_context_tokens: u64,
    pub tokens_per_file: u64,
    pub max_concurrent_launches: Option<usize>,
    pub fail_project_on_escalation: bool,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub bind_addr: String,
    pub webhook_url: Option<String>,
    pub worker_command: String,
    pub project_name: String,
    pub working_directory: PathBuf,
    pub roster: Roster,
}

/// The closed set of worker kinds this deployment accepts. Not itself a
/// configured key in §6.3 — a single external worker binary backs every
/// role, so there is exactly one recognized kind.
pub fn allowed_worker_kinds() -> HashSet<String> {
    HashSet::from(["agent".to_string()])
}

impl Config {
    /// Merge [`Cli`] (flags/env) over the TOML file at `cli.config`, falling
    /// back to built-in defaults for anything neither source sets, then
    /// validate the Roster.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let file = read_file_config(&cli.config)?;

        let default_timeout_ms = cli.default_timeout_ms.or(file.default_timeout_ms).unwrap_or(30 * 60 * 1_000);
        let heartbeat_timeout_ms = cli.heartbeat_timeout_ms.or(file.heartbeat_timeout_ms).unwrap_or(2 * 60 * 1_000);

        let config = Config {
            polling_interval: Duration::from_millis(
                cli.polling_interval_ms.or(file.polling_interval_ms).unwrap_or(5_000),
            ),
            heartbeat_interval_ms: cli.heartbeat_interval_ms.or(file.heartbeat_interval_ms).unwrap_or(30_000),
            heartbeat_timeout_ms,
            default_timeout_ms,
            max_retries: cli.max_retries.or(file.max_retries).unwrap_or(3),
            graceful_shutdown_timeout: Duration::from_millis(
                cli.graceful_shutdown_timeout_ms.or(file.graceful_shutdown_timeout_ms).unwrap_or(10_000),
            ),
            safe_context_tokens: cli.safe_context_tokens.or(file.safe_context_tokens).unwrap_or(150_000),
            tokens_per_file: cli.tokens_per_file.or(file.tokens_per_file).unwrap_or(4_000),
            max_concurrent_launches: cli.max_concurrent_launches.or(file.max_concurrent_launches),
            fail_project_on_escalation: file.fail_project_on_escalation.unwrap_or(false),
            data_dir: cli.data_dir.or(file.data_dir).unwrap_or_else(|| PathBuf::from("./apmas-data")),
            log_dir: cli.log_dir.or(file.log_dir).unwrap_or_else(|| PathBuf::from("./apmas-logs")),
            bind_addr: cli.bind_addr.or(file.bind_addr).unwrap_or_else(|| "127.0.0.1:7824".to_string()),
            webhook_url: cli.webhook_url.or(file.webhook_url),
            worker_command: cli.worker_command.or(file.worker_command).unwrap_or_else(|| "apmas-worker".to_string()),
            project_name: cli.project_name.or(file.project_name).unwrap_or_else(|| "apmas-project".to_string()),
            working_directory: cli
                .working_directory
                .or(file.working_directory)
                .unwrap_or_else(|| PathBuf::from(".")),
            roster: Roster::new(file.roster),
        };

        config.roster.validate(&allowed_worker_kinds())?;
        Ok(config)
    }

    pub fn supervisor_config(&self) -> apmas_engine::SupervisorConfig {
        let mut sc = apmas_engine::SupervisorConfig::new(self.heartbeat_timeout_ms, self.default_timeout_ms, self.max_retries);
        sc.polling_interval = self.polling_interval;
        sc.graceful_shutdown_timeout = self.graceful_shutdown_timeout;
        sc.max_concurrent_launches = self.max_concurrent_launches;
        sc.fail_project_on_escalation = self.fail_project_on_escalation;
        sc
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
