// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apmas-daemon`: the orchestrator process (`apmasd`). Bootstraps the
//! State Store/Supervisor/Checkpoint Engine, runs the Supervisor's polling
//! loop (§4.3) on a background task, and serves the Tool Surface (§4.7) as
//! an MCP/SSE server.

pub mod config;
pub mod launcher;
pub mod logging;
pub mod mcp;
pub mod notify;
pub mod state;
pub mod tools;

use std::sync::Arc;
use std::time::Duration;

use apmas_core::SystemClock;
use rmcp::transport::sse_server::SseServer;
use rmcp::ServiceExt;
use tracing::{error, info};

use config::Config;
use mcp::ToolSurface;
use state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to bootstrap daemon state: {0}")]
    Bootstrap(#[from] state::BootstrapError),
    #[error("failed to bind tool surface at {addr}: {source}")]
    Bind { addr: String, #[source] source: std::io::Error },
}

/// Runs until the process receives a shutdown signal. The Supervisor tick
/// loop and the MCP transport run concurrently; either one failing tears
/// down the other.
pub async fn run(config: Config) -> Result<(), RunError> {
    let state = Arc::new(AppState::bootstrap(config, SystemClock)?);

    let tick_state = state.clone();
    let polling_interval = tick_state.config.polling_interval;
    let tick_task = tokio::spawn(async move { run_tick_loop(tick_state, polling_interval).await });

    let bind_addr = state.config.bind_addr.clone();
    let surface = ToolSurface::new(state.clone());
    let sse = SseServer::serve(bind_addr.parse().map_err(|_| RunError::Bind {
        addr: bind_addr.clone(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid bind address"),
    })?)
    .await
    .map_err(|source| RunError::Bind { addr: bind_addr.clone(), source })?;

    info!(addr = %bind_addr, "tool surface listening");
    let ct = sse.with_service(move || surface.clone());

    tokio::signal::ctrl_c().await.ok();
    info!("shutdown signal received");
    ct.cancel();
    tick_task.abort();

    Ok(())
}

async fn run_tick_loop(state: Arc<AppState<SystemClock>>, polling_interval: Duration) {
    let mut interval = tokio::time::interval(polling_interval);
    loop {
        interval.tick().await;
        let mut supervisor = state.supervisor.lock().await;
        if let Err(err) = supervisor.tick().await {
            error!(error = %err, "supervisor tick failed");
        }
    }
}
