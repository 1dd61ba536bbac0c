// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification sinks (§6.2, §6.2a): where the Supervisor sends the single
//! best-effort notification fired when a role escalates or a project
//! completes.
//!
//! `ConsoleSink` is grounded on the teacher's `notify-rust` usage elsewhere
//! in the daemon crate; `WebhookSink` is enriched from the plain
//! `reqwest` JSON-POST pattern used across the example pack's service-style
//! crates, since the teacher itself has no webhook sink to copy.

use async_trait::async_trait;

/// A notification about one noteworthy run event.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Fire-and-forget: a failed notification is logged and dropped, never
/// retried, never surfaced to the caller as a `RuntimeError` (§6.2 — a
/// notification sink outage must not stall the Supervisor Loop).
#[async_trait]
pub trait NotifySink: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Desktop notification via `notify-rust`. The default sink when no webhook
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

#[async_trait]
impl NotifySink for ConsoleSink {
    async fn notify(&self, notification: Notification) {
        let result = notify_rust::Notification::new()
            .summary(&notification.title)
            .body(&notification.body)
            .show();
        if let Err(err) = result {
            tracing::warn!(error = %err, "desktop notification failed");
        }
    }
}

/// Posts the notification as a JSON body to a configured webhook URL.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl NotifySink for WebhookSink {
    async fn notify(&self, notification: Notification) {
        let body = serde_json::json!({
            "title": notification.title,
            "body": notification.body,
        });
        if let Err(err) = self.client.post(&self.url).json(&body).send().await {
            tracing::warn!(error = %err, url = %self.url, "webhook notification failed");
        }
    }
}

/// Used where a component needs a `NotifySink` but no notifications have
/// been configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl NotifySink for NullSink {
    async fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
