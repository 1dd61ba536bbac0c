//! `apmasctl agents` specs.

use crate::prelude::*;

#[test]
fn agents_lists_the_seeded_role() {
    let project = Project::seeded();

    project.apmasctl().args(&["agents"]).passes().stdout_has("architect");
}

#[test]
fn agents_role_filter_narrows_to_a_matching_role() {
    let project = Project::seeded();

    project
        .apmasctl()
        .args(&["agents", "--role", "architect"])
        .passes()
        .stdout_has("architect");
}

#[test]
fn agents_role_filter_reports_no_matches_for_an_unknown_role() {
    let project = Project::seeded();

    project
        .apmasctl()
        .args(&["agents", "--role", "ghost"])
        .passes()
        .stdout_has("no matching roles");
}
