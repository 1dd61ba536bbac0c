//! `apmasctl status` against a real State Store.

use crate::prelude::*;

#[test]
fn status_text_reports_the_seeded_project_and_role() {
    let project = Project::seeded();

    project.apmasctl().args(&["status"]).passes().stdout_has("demo").stdout_has("architect");
}

#[test]
fn status_json_is_valid_and_reports_agent_count() {
    let project = Project::seeded();

    let output = project.apmasctl().args(&["--format", "json", "status"]).passes();
    output.stdout_has("\"agent_count\"");
}

#[test]
fn status_against_a_fresh_data_dir_reports_uninitialized() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .args(&["--data-dir"])
        .args(&[dir.path().to_str().unwrap()])
        .args(&["status"])
        .passes()
        .stdout_has("not yet initialized");
}
