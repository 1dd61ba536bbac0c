//! `apmasctl messages <role>` specs.

use crate::prelude::*;

#[test]
fn messages_reports_none_addressed_to_a_quiet_role() {
    let project = Project::seeded();

    project
        .apmasctl()
        .args(&["messages", "architect"])
        .passes()
        .stdout_has("no messages addressed to architect");
}

#[test]
fn messages_rejects_an_empty_role_name() {
    let project = Project::seeded();

    project.apmasctl().args(&["messages", ""]).fails().stderr_has("invalid role");
}
