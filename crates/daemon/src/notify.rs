// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fans a single notification out to every sink configured for this
//! deployment (§6.2a: "more than one sink may be active simultaneously").
//! `apmas_engine::Supervisor` takes exactly one `NotifySink`, so this type
//! is that one sink from the Supervisor's point of view.

use apmas_engine::{ConsoleSink, Notification, NotifySink, WebhookSink};
use async_trait::async_trait;

pub struct CompositeNotifySink {
    sinks: Vec<Box<dyn NotifySink>>,
}

impl CompositeNotifySink {
    /// Console notifications are always on; a webhook sink is added on top
    /// when `webhook_url` is configured.
    pub fn new(webhook_url: Option<&str>) -> Self {
        let mut sinks: Vec<Box<dyn NotifySink>> = vec![Box::new(ConsoleSink)];
        if let Some(url) = webhook_url {
            sinks.push(Box::new(WebhookSink::new(url)));
        }
        Self { sinks }
    }
}

#[async_trait]
impl NotifySink for CompositeNotifySink {
    async fn notify(&self, notification: Notification) {
        for sink in &self.sinks {
            sink.notify(notification.clone()).await;
        }
    }
}

#[async_trait]
impl NotifySink for std::sync::Arc<CompositeNotifySink> {
    async fn notify(&self, notification: Notification) {
        (**self).notify(notification).await;
    }
}
