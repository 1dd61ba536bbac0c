// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup (SPEC_FULL §9a): `tracing-subscriber`'s `EnvFilter`
//! (`RUST_LOG`, default `info`) over a `tracing-appender` non-blocking daily
//! rolling file writer under the configured log directory.
//!
//! Grounded on the example pack's `EnvFilter`-plus-file-writer convention
//! (e.g. `graphweave-cli/src/logging.rs`), adapted to write daily-rotated
//! files instead of a single fixed path since the daemon is long-running.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Must be kept alive for the life of the process — dropping it stops the
/// background flush thread and silently truncates in-flight log lines.
pub fn init(log_dir: &Path) -> Result<WorkerGuard, std::io::Error> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "apmasd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry().with(filter).with(file_layer).init();
    Ok(guard)
}
