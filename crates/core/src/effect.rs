// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects emitted by the engine (Supervisor, Recovery Policy, Heartbeat
//! Tracker) for execution by the daemon's I/O layer: spawning/killing worker
//! processes, arming timers, and notifying operators.

use std::time::Duration;

use crate::role::Role;

/// A side effect the engine wants performed outside its own critical section.
///
/// Mirrors the teacher's `Effect` enum: a plain data description of "do this",
/// logged structurally via [`Effect::name`]/[`Effect::fields`] rather than by
/// formatting the whole value.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Effect {
    /// Launch a worker process for `role` with the given rendered prompt.
    SpawnWorker { role: Role, prompt: String },
    /// Tear down the worker process for `role` (graceful, then forced).
    KillWorker { role: Role },
    /// Arm a deadline timer identified by `id` for `role`.
    SetTimer {
        role: Role,
        id: String,
        #[serde(with = "duration_serde")]
        duration: Duration,
    },
    /// Cancel a previously-armed timer.
    CancelTimer { role: Role, id: String },
    /// Send an escalation or completion event to the configured notification sink.
    Notify {
        role: Option<Role>,
        summary: String,
    },
    /// Emit an arbitrary structured log event (used for illegal-transition
    /// and malformed-checkpoint warnings per §4.2a/§4.5).
    Emit { level: EmitLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EmitLevel {
    Info,
    Warn,
    Error,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::SpawnWorker { .. } => "spawn_worker",
            Effect::KillWorker { .. } => "kill_worker",
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
            Effect::Notify { .. } => "notify",
            Effect::Emit { .. } => "emit",
        }
    }

    /// Structured fields for `tracing`, deliberately excluding large payloads
    /// like the worker prompt.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::SpawnWorker { role, .. } => vec![("role", role.to_string())],
            Effect::KillWorker { role } => vec![("role", role.to_string())],
            Effect::SetTimer { role, id, duration } => vec![
                ("role", role.to_string()),
                ("timer_id", id.clone()),
                ("duration_ms", duration.as_millis().to_string()),
            ],
            Effect::CancelTimer { role, id } => {
                vec![("role", role.to_string()), ("timer_id", id.clone())]
            }
            Effect::Notify { role, .. } => {
                vec![("role", role.as_ref().map(|r| r.to_string()).unwrap_or_default())]
            }
            Effect::Emit { level, .. } => vec![("level", format!("{level:?}"))],
        }
    }
}

/// Serializes [`Duration`] as whole milliseconds, matching the teacher's wire convention.
mod duration_serde {
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }

    use serde::Deserialize;
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
