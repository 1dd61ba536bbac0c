use std::sync::Arc;

use apmas_wire::PROJECT_STATE_URI;
use serde_json::json;

use super::*;
use crate::tools::test_support::app_state;

fn surface(dir: &tempfile::TempDir) -> ToolSurface<apmas_core::FakeClock> {
    ToolSurface::new(Arc::new(app_state(dir)))
}

#[test]
fn lists_all_seven_tools() {
    let tools = apmas_wire::definition::tool_definitions();
    assert_eq!(tools.len(), 7);
}

#[tokio::test]
async fn call_tool_dispatches_heartbeat() {
    let dir = tempfile::tempdir().unwrap();
    let surface = surface(&dir);

    let result = surface
        .dispatch("heartbeat", json!({"role": "architect", "activity": "working"}))
        .await
        .unwrap();

    assert_eq!(result["acknowledged"], json!(true));
}

#[tokio::test]
async fn call_tool_reports_unknown_role_as_domain_error() {
    let dir = tempfile::tempdir().unwrap();
    let surface = surface(&dir);

    let err = surface.dispatch("heartbeat", json!({"role": "ghost", "activity": "working"})).await.unwrap_err();

    assert!(matches!(err, apmas_core::DomainError::UnknownRole { .. }));
}

#[tokio::test]
async fn read_resource_returns_project_state() {
    let dir = tempfile::tempdir().unwrap();
    let surface = surface(&dir);

    let text = resources::ResourceHost::read(&surface, PROJECT_STATE_URI).unwrap();
    assert!(text.contains("apmas-project") || text.contains("project"));
}

#[tokio::test]
async fn resource_descriptors_include_every_role() {
    let dir = tempfile::tempdir().unwrap();
    let surface = surface(&dir);

    let descriptors = resources::ResourceHost::resource_descriptors(&surface);
    assert!(descriptors.len() >= 3);
}
