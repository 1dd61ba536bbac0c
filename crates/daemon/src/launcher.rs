// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The real Worker Launcher (C7, §4.9): spawns a worker as a child process
//! via `tokio::process::Command`, writes the rendered prompt to its stdin,
//! and implements the teacher's two-phase graceful-then-forced shutdown
//! using `nix`'s `SIGTERM` followed by a hard kill on timeout.
//!
//! Grounded on `apmas_engine::launcher::WorkerLauncher`'s trait contract and
//! the graceful/force-kill convention [`DESIGN.md`] traces to the teacher's
//! daemon crate; the `FakeLauncher` this mirrors lives in `apmas-engine` for
//! Supervisor unit tests and is not reused here since this is the one real
//! implementation.

use std::io::Write as _;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use apmas_core::Role;
use apmas_engine::{ExitReport, LauncherError, WorkerLauncher};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

/// Spawns one external worker binary per role, feeding the rendered prompt
/// on stdin and closing it so the worker sees EOF once the prompt is fully
/// written.
pub struct ProcessLauncher {
    command: String,
}

impl ProcessLauncher {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

pub struct ProcessHandle {
    child: Arc<Mutex<Child>>,
    pid: Option<u32>,
}

#[async_trait]
impl WorkerLauncher for ProcessLauncher {
    type Handle = ProcessHandle;

    async fn launch(&self, role: &Role, prompt: &str) -> Result<ProcessHandle, LauncherError> {
        let mut child = Command::new(&self.command)
            .arg("--role")
            .arg(role.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| LauncherError::Spawn(err.to_string()))?;

        let pid = child.id();
        let mut stdin = child.stdin.take().ok_or_else(|| LauncherError::Stdin("no stdin handle".to_string()))?;
        stdin.write_all(prompt.as_bytes()).await.map_err(|err| LauncherError::Stdin(err.to_string()))?;
        stdin.shutdown().await.map_err(|err| LauncherError::Stdin(err.to_string()))?;
        drop(stdin);

        Ok(ProcessHandle {
            child: Arc::new(Mutex::new(child)),
            pid,
        })
    }

    async fn poll_exit(&self, handle: &ProcessHandle) -> Option<ExitReport> {
        let mut child = handle.child.lock().await;
        match child.try_wait() {
            // A process that exits on its own, at any code, is a crash from
            // the launcher's point of view (§4.9) — the Supervisor already
            // knows about a clean finish through the `complete` tool call.
            Ok(Some(status)) => Some(ExitReport::Crashed { exit_code: status.code() }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to poll worker process exit status");
                Some(ExitReport::Crashed { exit_code: None })
            }
        }
    }

    async fn terminate(&self, handle: ProcessHandle, graceful_timeout: Duration) -> ExitReport {
        if let Some(pid) = handle.pid {
            send_sigterm(pid);
        }

        let mut child = handle.child.lock().await;
        match tokio::time::timeout(graceful_timeout, child.wait()).await {
            Ok(Ok(status)) => ExitReport::Crashed { exit_code: status.code() },
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "error awaiting worker exit during graceful shutdown");
                ExitReport::Crashed { exit_code: None }
            }
            Err(_) => {
                if let Err(err) = child.start_kill() {
                    tracing::warn!(error = %err, "failed to force-kill unresponsive worker");
                }
                match child.wait().await {
                    Ok(status) => ExitReport::Crashed { exit_code: status.code() },
                    Err(_) => ExitReport::Crashed { exit_code: None },
                }
            }
        }
    }
}

fn send_sigterm(pid: u32) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    if let Err(err) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        tracing::warn!(pid, error = %err, "failed to send SIGTERM to worker process");
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
