mod common;

use interpose_facade::{
    AuditConfig, BackingStore, ConfiguredPolicy, Facade, FacadeError, Key, Operation, Outcome,
    PolicyConfig, ReadOnlyMode, RecordingObserver,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::io::Write;
use std::sync::Arc;

fn facade_with(config: PolicyConfig) -> Facade<Value, ConfiguredPolicy> {
    common::init_tracing();
    Facade::create(BackingStore::<Value>::new(), ConfiguredPolicy::new(config)).unwrap()
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn empty_toml_gives_defaults() {
    let config = PolicyConfig::from_toml_str("").unwrap();
    assert_eq!(config, PolicyConfig::default());
    assert_eq!(config.read_only_mode, ReadOnlyMode::Ignore);
    assert!(!config.strict_reads);
    assert!(!config.audit.enabled);
    assert_eq!(config.audit.history_key, "history");
}

#[test]
fn full_toml_parses() {
    let config = PolicyConfig::from_toml_str(
        r#"
        hidden = ["middleName"]
        read-only = ["age"]
        protected = ["id"]
        read-only-mode = "reject"
        strict-reads = true

        [audit]
        enabled = true
        history-key = "log"
        "#,
    )
    .unwrap();

    assert_eq!(config.hidden, vec!["middleName"]);
    assert_eq!(config.read_only, vec!["age"]);
    assert_eq!(config.protected, vec!["id"]);
    assert_eq!(config.read_only_mode, ReadOnlyMode::Reject);
    assert!(config.strict_reads);
    assert_eq!(
        config.audit,
        AuditConfig {
            enabled: true,
            history_key: "log".to_string(),
        }
    );
}

#[test]
fn audit_section_defaults_history_key() {
    let config = PolicyConfig::from_toml_str("[audit]\nenabled = true\n").unwrap();
    assert_eq!(config.audit.history_key, "history");
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = PolicyConfig::from_toml_str("hidden = \"not a list\"").unwrap_err();
    assert!(matches!(err, FacadeError::Config(_)));
}

#[test]
fn unknown_read_only_mode_is_rejected() {
    assert!(PolicyConfig::from_toml_str("read-only-mode = \"shout\"").is_err());
}

// ── Loading ──────────────────────────────────────────────────────

#[test]
fn load_from_missing_file_falls_back_to_default() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = PolicyConfig::load_from(dir.path().join("policy.toml"));
    assert_eq!(config, PolicyConfig::default());
}

#[test]
fn load_from_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "protected = [\"id\"]").unwrap();

    let config = PolicyConfig::load_from(&path);
    assert_eq!(config.protected, vec!["id"]);
}

#[test]
fn load_from_bad_file_falls_back_to_default() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    assert_eq!(PolicyConfig::load_from(&path), PolicyConfig::default());
    assert!(matches!(
        PolicyConfig::try_load_from(&path),
        Err(FacadeError::Config(_))
    ));
}

#[test]
fn try_load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PolicyConfig::try_load_from(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, FacadeError::Io(_)));
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn empty_key_names_are_misconfiguration() {
    let config = PolicyConfig {
        hidden: vec![String::new()],
        ..Default::default()
    };
    let err = Facade::create(BackingStore::<Value>::new(), ConfiguredPolicy::new(config)).unwrap_err();
    assert!(matches!(err, FacadeError::Misconfigured(_)));
}

#[test]
fn history_key_cannot_be_read_only() {
    let config = PolicyConfig {
        read_only: vec!["history".into()],
        audit: AuditConfig {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn history_key_may_be_read_only_when_audit_is_off() {
    let config = PolicyConfig {
        read_only: vec!["history".into()],
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

// ── Rules ────────────────────────────────────────────────────────

#[test]
fn hidden_keys_are_readable_but_not_enumerated() {
    let mut facade = facade_with(PolicyConfig {
        hidden: vec!["middleName".into()],
        ..Default::default()
    });
    facade.write("firstName", json!("Dave")).unwrap();
    facade.write("middleName", json!("William")).unwrap();
    facade.write("age", json!(42)).unwrap();

    assert_eq!(
        facade.enumerate().unwrap(),
        vec![Key::from("firstName"), Key::from("age")]
    );
    assert!(facade.contains("middleName").unwrap());
    assert_eq!(facade.read("middleName").unwrap(), Some(json!("William")));
    assert_eq!(facade.store().len(), 3);
}

#[test]
fn read_only_keys_ignore_writes_by_default() {
    let mut facade = facade_with(PolicyConfig {
        read_only: vec!["age".into()],
        ..Default::default()
    });
    facade.write("age", json!(41)).unwrap();
    assert_eq!(facade.read("age").unwrap(), None);
}

#[test]
fn read_only_keys_reject_writes_in_reject_mode() {
    let mut facade = facade_with(PolicyConfig {
        read_only: vec!["age".into()],
        read_only_mode: ReadOnlyMode::Reject,
        ..Default::default()
    });
    let err = facade.write("age", json!(41)).unwrap_err();
    assert!(matches!(err, FacadeError::ReadOnly { ref key } if key == "age"));
    facade.write("firstName", json!("Dave")).unwrap();
}

#[test]
fn protected_keys_refuse_delete() {
    let mut facade = facade_with(PolicyConfig {
        protected: vec!["id".into()],
        ..Default::default()
    });
    facade.write("id", json!(7)).unwrap();
    assert!(facade.delete("id").unwrap_err().is_protected_key());
    assert_eq!(facade.read("id").unwrap(), Some(json!(7)));
}

#[test]
fn strict_reads_turn_absence_into_an_error() {
    let mut facade = facade_with(PolicyConfig {
        strict_reads: true,
        ..Default::default()
    });
    let err = facade.read("middleName").unwrap_err();
    assert!(matches!(err, FacadeError::MissingKey { ref key } if key == "middleName"));

    facade.write("middleName", Value::Null).unwrap();
    assert_eq!(facade.read("middleName").unwrap(), Some(Value::Null));
}

// ── Audit layer ──────────────────────────────────────────────────

#[test]
fn audit_layer_records_only_permitted_writes() {
    let mut facade = facade_with(PolicyConfig {
        read_only: vec!["age".into()],
        audit: AuditConfig {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    });
    facade.write("firstName", json!("Dave")).unwrap();
    facade.write("age", json!(41)).unwrap();

    let audit = facade.traps().audit().unwrap();
    assert_eq!(audit.history().len(), 1);
    assert_eq!(audit.history()[0].key, Key::from("firstName"));
    assert!(facade.contains("history").unwrap());
    assert!(facade.delete("history").unwrap_err().is_protected_key());
}

#[test]
fn audit_layer_absent_when_disabled() {
    let facade = facade_with(PolicyConfig::default());
    assert!(facade.traps().audit().is_none());
    assert!(!facade.contains("history").unwrap());
}

#[test]
fn strict_reads_still_serve_history() {
    let facade = facade_with(PolicyConfig {
        strict_reads: true,
        audit: AuditConfig {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    });
    assert_eq!(facade.read("history").unwrap(), Some(json!([])));
}

#[test]
fn observer_receives_rule_and_audit_events() {
    let observer = RecordingObserver::new();
    let policy = ConfiguredPolicy::new(PolicyConfig {
        read_only: vec!["age".into()],
        audit: AuditConfig {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    })
    .with_observer(Arc::new(observer.clone()));
    let mut facade = Facade::create(BackingStore::<Value>::new(), policy).unwrap();

    facade.write("age", json!(41)).unwrap();
    facade.write("firstName", json!("Dave")).unwrap();

    let outcomes: Vec<(Operation, Outcome)> = observer
        .events()
        .into_iter()
        .map(|e| (e.operation, e.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (Operation::Write, Outcome::Ignored),
            (Operation::Write, Outcome::PassedThrough),
        ]
    );
}
