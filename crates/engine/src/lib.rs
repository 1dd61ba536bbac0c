// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The orchestration engine: everything that decides what happens next to a
//! role, as opposed to `apmas-storage` (what happened) or `apmas-wire` (how
//! it's said over the wire).
//!
//! - [`supervisor`] — the Supervisor Loop (C8), the top-level coordinator.
//! - [`heartbeat`] — the Heartbeat Tracker (C3).
//! - [`recovery`] — the Recovery Policy (C4).
//! - [`checkpoint_engine`] — the Checkpoint Engine (C5).
//! - [`launcher`] — the Worker Launcher (C7) trait and process-free fake.
//! - [`roster_validate`] — Roster (C2) startup validation.
//! - [`notify`] — notification sinks (§6.2).
//! - [`prompt`] — prompt synthesis (§6.5).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod checkpoint_engine;
pub mod error;
pub mod heartbeat;
pub mod launcher;
pub mod notify;
pub mod prompt;
pub mod recovery;
pub mod roster_validate;
pub mod supervisor;

pub use checkpoint_engine::CheckpointEngine;
pub use error::RuntimeError;
pub use heartbeat::{HeartbeatTracker, StaleReason};
pub use launcher::{ExitReport, LauncherError, WorkerLauncher};
pub use notify::{ConsoleSink, Notification, NotifySink, NullSink, WebhookSink};
pub use prompt::PromptKind;
pub use recovery::{RecoveryDecisionBuilder, RecoveryOutcome};
pub use roster_validate::{dependencies_satisfied, initialize};
pub use supervisor::{Supervisor, SupervisorConfig};
