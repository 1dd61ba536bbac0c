//! `apmasctl checkpoint <role>` specs.

use crate::prelude::*;

#[test]
fn checkpoint_reports_the_sentinel_when_none_was_ever_stored() {
    let project = Project::seeded();

    project.apmasctl().args(&["checkpoint", "architect"]).passes();
}

#[test]
fn checkpoint_reports_percent_complete_in_json() {
    let project = Project::seeded();

    project
        .apmasctl()
        .args(&["--format", "json", "checkpoint", "architect"])
        .passes();
}
