//! CLI help output specs.

use crate::prelude::*;

#[test]
fn apmasctl_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn apmasctl_status_help_is_listed() {
    cli().args(&["--help"]).passes().stdout_has("status");
}

#[test]
fn apmasctl_with_no_command_fails() {
    cli().fails();
}
