use super::*;

#[test]
fn spawn_worker_fields_include_role() {
    let effect = Effect::SpawnWorker {
        role: Role::new("architect").unwrap(),
        prompt: "a very long prompt".to_string(),
    };
    assert_eq!(effect.name(), "spawn_worker");
    assert_eq!(effect.fields(), vec![("role", "architect".to_string())]);
}

#[test]
fn set_timer_serializes_duration_as_millis() {
    let effect = Effect::SetTimer {
        role: Role::new("developer").unwrap(),
        id: "heartbeat".to_string(),
        duration: Duration::from_secs(5),
    };
    let json = serde_json::to_value(&effect).unwrap();
    let duration_field = &json["SetTimer"]["duration"];
    assert_eq!(duration_field, &serde_json::json!(5000));
}

#[test]
fn notify_without_role_has_empty_field() {
    let effect = Effect::Notify {
        role: None,
        summary: "project complete".to_string(),
    };
    assert_eq!(effect.fields(), vec![("role", String::new())]);
}
