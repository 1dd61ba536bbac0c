// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shared error taxonomy exposed at the Tool Surface boundary (§7).
//!
//! Internal engine/storage errors (launch failure, WAL I/O faults) are
//! distinct types that never cross the Tool Surface directly; they are
//! mapped into this closed set where relevant (`StorageUnavailable`).

/// A user-visible error returned by a Tool Surface verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainError {
    #[error("unknown role: {role}")]
    UnknownRole { role: String },

    #[error("unknown from-role: {role}")]
    UnknownFromRole { role: String },

    #[error("blocked_reason is required when status = blocked")]
    MissingBlockedReason,

    #[error("target role is required when kind = agent")]
    MissingTarget,

    #[error("invalid status value: {status}")]
    InvalidStatus { status: String },

    #[error("invalid message type: {message_type}")]
    InvalidType { message_type: String },

    #[error("invalid checkpoint: {reason}")]
    InvalidCheckpoint { reason: String },

    #[error("role {role} is already in a terminal state")]
    AlreadyTerminal { role: String },

    #[error("storage unavailable; retry")]
    StorageUnavailable,

    #[error("connection not initialized; call initialize first")]
    NotInitialized,
}

impl From<crate::checkpoint::InvalidCheckpoint> for DomainError {
    fn from(err: crate::checkpoint::InvalidCheckpoint) -> Self {
        DomainError::InvalidCheckpoint {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
