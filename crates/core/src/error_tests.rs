use super::*;
use crate::checkpoint::Checkpoint;
use crate::role::Role;

#[test]
fn unknown_role_message_includes_role_name() {
    let err = DomainError::UnknownRole {
        role: "ghost".to_string(),
    };
    assert_eq!(err.to_string(), "unknown role: ghost");
}

#[test]
fn invalid_checkpoint_converts_from_checkpoint_error() {
    let invalid = Checkpoint::new(
        Role::new("a").unwrap(),
        0,
        "s",
        vec!["x".into()],
        vec!["y".into()],
        vec![],
        None,
        1,
    )
    .unwrap_err();
    let domain: DomainError = invalid.into();
    assert!(matches!(domain, DomainError::InvalidCheckpoint { .. }));
}

#[test]
fn serde_tag_is_kind() {
    let err = DomainError::MissingTarget;
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "missing_target");
}
