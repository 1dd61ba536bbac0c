// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use apmas_daemon::config::{Cli, Config};
use clap::Parser;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("apmasd: invalid configuration: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let _guard = match apmas_daemon::logging::init(&config.log_dir) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("apmasd: failed to initialize logging: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(err) = apmas_daemon::run(config).await {
        tracing::error!(error = %err, "apmasd exited with an error");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
