// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apmasctl`: a read-only operator inspector over the State Store a
//! running `apmasd` writes to. Kept intentionally small (config file
//! parsing and worker orchestration stay in `apmas-daemon`; this binary is
//! outside the core size budget per spec.md §1).

mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "apmasctl", about = "Inspect a running APMAS project")]
struct Cli {
    /// Data directory a running `apmasd` was started with.
    #[arg(long, env = "APMAS_DATA_DIR", default_value = "./apmas-data")]
    data_dir: PathBuf,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project phase and a one-line-per-role summary.
    Status,
    /// Per-role detail, optionally narrowed to one role.
    Agents {
        #[arg(long)]
        role: Option<String>,
    },
    /// Messages addressed to one role (direct or broadcast).
    Messages { role: String },
    /// The latest stored checkpoint for one role.
    Checkpoint { role: String },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Status => commands::status::handle(&cli.data_dir, cli.format),
        Command::Agents { role } => commands::agents::handle(&cli.data_dir, role.clone(), cli.format),
        Command::Messages { role } => commands::messages::handle(&cli.data_dir, role, cli.format),
        Command::Checkpoint { role } => commands::checkpoint::handle(&cli.data_dir, role, cli.format),
    };

    if let Err(err) = result {
        match err.downcast_ref::<ExitError>() {
            Some(exit_error) => {
                eprintln!("apmasctl: {}", exit_error.message);
                std::process::exit(exit_error.code);
            }
            None => {
                eprintln!("apmasctl: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
