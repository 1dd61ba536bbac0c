// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;

fn cli_with_config(path: &Path) -> Cli {
    Cli::parse_from(["apmasd", "--config", &path.to_string_lossy()])
}

fn write_toml(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("apmas.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_apply_when_file_omits_a_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_toml(&dir, "max_retries = 5\n");
    let config = Config::load(cli_with_config(&path)).unwrap();
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.heartbeat_timeout_ms, 2 * 60 * 1_000);
}

#[test]
fn cli_flag_overrides_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_toml(&dir, "max_retries = 5\n");
    let mut cli = cli_with_config(&path);
    cli.max_retries = Some(9);
    let config = Config::load(cli).unwrap();
    assert_eq!(config.max_retries, 9);
}

#[test]
fn roster_table_parses_into_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_toml(
        &dir,
        r#"
        [[roster]]
        role = "architect"
        worker_kind = "agent"
        dependencies = []

        [[roster]]
        role = "developer"
        worker_kind = "agent"
        dependencies = ["architect"]
        "#,
    );
    let config = Config::load(cli_with_config(&path)).unwrap();
    assert_eq!(config.roster.entries.len(), 2);
    assert_eq!(config.roster.entries[1].dependencies, vec![apmas_core::Role::from("architect")]);
}

#[test]
fn invalid_roster_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_toml(
        &dir,
        r#"
        [[roster]]
        role = "developer"
        worker_kind = "agent"
        dependencies = ["missing"]
        "#,
    );
    let err = Config::load(cli_with_config(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRoster(_)));
}

#[test]
fn missing_file_is_a_read_error() {
    let cli = cli_with_config(Path::new("/nonexistent/apmas.toml"));
    let err = Config::load(cli).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
