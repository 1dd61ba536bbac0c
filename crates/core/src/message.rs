// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The append-only inter-agent message log's entity type.

use std::fmt;

use crate::define_id;
use crate::role::Role;

define_id! {
    /// Unique, immutable identifier for one logged message.
    pub struct MessageId("msg-");
}

/// Classification of a logged message, set by the Tool Surface verb that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Assignment,
    Progress,
    Question,
    Answer,
    Heartbeat,
    Checkpoint,
    Done,
    NeedsReview,
    Approved,
    ChangesRequested,
    Blocked,
    ContextLimit,
    Error,
    Info,
    Request,
}

crate::simple_display! {
    MessageType {
        Assignment => "assignment",
        Progress => "progress",
        Question => "question",
        Answer => "answer",
        Heartbeat => "heartbeat",
        Checkpoint => "checkpoint",
        Done => "done",
        NeedsReview => "needs_review",
        Approved => "approved",
        ChangesRequested => "changes_requested",
        Blocked => "blocked",
        ContextLimit => "context_limit",
        Error => "error",
        Info => "info",
        Request => "request",
    }
}

/// A message addressee: a specific role, or the broadcast sentinel `all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToRole {
    Role(Role),
    /// Addressed to every role (`to = all` in §6/§4.6).
    Broadcast,
}

/// Text did not parse as either a role or the broadcast sentinel.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid addressee: {0}")]
pub struct InvalidToRole(pub String);

impl ToRole {
    pub const BROADCAST_SENTINEL: &'static str = "all";

    pub fn parse(s: &str) -> Result<Self, InvalidToRole> {
        if s == Self::BROADCAST_SENTINEL {
            Ok(ToRole::Broadcast)
        } else {
            Role::new(s)
                .map(ToRole::Role)
                .map_err(|_| InvalidToRole(s.to_string()))
        }
    }

    /// Whether a query addressed to `role` should see a message sent `to = self`.
    pub fn matches(&self, role: &Role) -> bool {
        match self {
            ToRole::Role(r) => r == role,
            ToRole::Broadcast => true,
        }
    }
}

impl fmt::Display for ToRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToRole::Role(r) => write!(f, "{r}"),
            ToRole::Broadcast => write!(f, "{}", Self::BROADCAST_SENTINEL),
        }
    }
}

impl serde::Serialize for ToRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ToRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ToRole::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Role> for ToRole {
    fn from(role: Role) -> Self {
        ToRole::Role(role)
    }
}

/// One immutable, append-only log entry (§3, §4.6).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgentMessage {
    pub id: MessageId,
    pub timestamp_ms: u64,
    pub from_role: Role,
    pub to_role: ToRole,
    pub message_type: MessageType,
    pub content: String,
    pub artifacts: Option<Vec<String>>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl AgentMessage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp_ms: u64,
        from_role: Role,
        to_role: ToRole,
        message_type: MessageType,
        content: impl Into<String>,
        artifacts: Option<Vec<String>>,
        metadata: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            timestamp_ms,
            from_role,
            to_role,
            message_type,
            content: content.into(),
            artifacts,
            metadata,
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
