// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker Launcher (C7, §4.9): owns the operating-system process for one
//! worker, behind a trait so the Supervisor never hard-codes a spawn
//! mechanism and tests never spawn real processes.
//!
//! Grounded on the teacher's `RuntimeDeps`-style launcher indirection
//! (`crates/daemon/src/engine/runtime/mod.rs`) and the graceful-then-forced
//! shutdown convention used throughout the teacher's daemon crate.

use std::time::Duration;

use apmas_core::Role;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("failed to spawn worker process: {0}")]
    Spawn(String),
    #[error("failed to write prompt to worker stdin: {0}")]
    Stdin(String),
}

/// How a worker process ended, as observed by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReport {
    /// The process exited after the worker called `complete` (§4.7) — the
    /// Supervisor already knows this from the tool call and the exit itself
    /// carries no new information.
    Completed,
    /// The process exited (any code) without ever calling `complete`. Per
    /// §9 Open Question resolution, this is always treated as a crash —
    /// there is no reliable signal distinguishing a clean early exit from a
    /// failure at this layer.
    Crashed { exit_code: Option<i32> },
}

/// Starts, watches, and tears down worker processes. One real implementation
/// (`apmas-daemon`, spawning via `tokio::process::Command`) and one fake used
/// in engine tests.
#[async_trait]
pub trait WorkerLauncher: Send + Sync {
    type Handle: Send + Sync;

    /// Start a worker process for `role`, feeding it `prompt` (§6.5).
    async fn launch(&self, role: &Role, prompt: &str) -> Result<Self::Handle, LauncherError>;

    /// Non-blocking check for whether the process has exited since the last
    /// poll. `None` means it's still running.
    async fn poll_exit(&self, handle: &Self::Handle) -> Option<ExitReport>;

    /// Two-phase shutdown (§4.9): ask nicely, wait up to
    /// `graceful_timeout`, then send a forceful kill signal if the process
    /// hasn't exited. Always returns — a launcher that can't confirm exit
    /// within its own internal bound reports `Crashed` rather than hanging
    /// the Supervisor.
    async fn terminate(&self, handle: Self::Handle, graceful_timeout: Duration) -> ExitReport;
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use std::collections::HashMap;

    use parking_lot::Mutex;

    use super::*;

    /// A scripted launcher for engine tests: `launch` always succeeds and
    /// hands back an opaque counter; exits are injected via
    /// [`FakeLauncher::inject_exit`] rather than discovered by polling a
    /// real process.
    #[derive(Default)]
    pub struct FakeLauncher {
        next_handle: Mutex<u64>,
        exits: Mutex<HashMap<u64, ExitReport>>,
        pub launched: Mutex<Vec<(Role, String)>>,
    }

    impl FakeLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn inject_exit(&self, handle: u64, report: ExitReport) {
            self.exits.lock().insert(handle, report);
        }
    }

    #[async_trait]
    impl WorkerLauncher for FakeLauncher {
        type Handle = u64;

        async fn launch(&self, role: &Role, prompt: &str) -> Result<u64, LauncherError> {
            self.launched.lock().push((role.clone(), prompt.to_string()));
            let mut next = self.next_handle.lock();
            *next += 1;
            Ok(*next)
        }

        async fn poll_exit(&self, handle: &u64) -> Option<ExitReport> {
            self.exits.lock().remove(handle)
        }

        async fn terminate(&self, handle: u64, _graceful_timeout: Duration) -> ExitReport {
            self.exits
                .lock()
                .remove(&handle)
                .unwrap_or(ExitReport::Crashed { exit_code: None })
        }
    }

    /// Lets tests hold a handle to the same `FakeLauncher` the Supervisor
    /// owns, to inject exits and inspect launch calls after the fact.
    #[async_trait]
    impl WorkerLauncher for std::sync::Arc<FakeLauncher> {
        type Handle = u64;

        async fn launch(&self, role: &Role, prompt: &str) -> Result<u64, LauncherError> {
            (**self).launch(role, prompt).await
        }

        async fn poll_exit(&self, handle: &u64) -> Option<ExitReport> {
            (**self).poll_exit(handle).await
        }

        async fn terminate(&self, handle: u64, graceful_timeout: Duration) -> ExitReport {
            (**self).terminate(handle, graceful_timeout).await
        }
    }
}
