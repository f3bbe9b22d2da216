use std::io::Write;
use std::path::PathBuf;

use seatplan::config::{SeatingConfig, SeatingPolicy};
use seatplan::error::ErrorKind;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn defaults() {
    let config = SeatingConfig::default();
    assert_eq!(config.database_path, PathBuf::from(".data").join("seatplan.db"));
    assert!(!config.enforce_capacity);
    assert_eq!(config.policy(), SeatingPolicy::default());
}

#[test]
fn load_full_file() {
    let file = write_config(
        r#"{ "database_path": "wedding.db", "enforce_capacity": true, "log_filter": "seatplan=debug" }"#,
    );
    let config = SeatingConfig::load(file.path()).unwrap();
    assert_eq!(config.database_path, PathBuf::from("wedding.db"));
    assert!(config.policy().enforce_capacity);
    assert_eq!(config.log_filter, "seatplan=debug");
}

#[test]
fn missing_keys_keep_defaults() {
    let file = write_config(r#"{ "enforce_capacity": true }"#);
    let config = SeatingConfig::load(file.path()).unwrap();
    assert!(config.enforce_capacity);
    assert_eq!(config.database_path, SeatingConfig::default().database_path);
    assert_eq!(config.log_filter, "seatplan=info");
}

#[test]
fn invalid_json_is_rejected() {
    let file = write_config("{ enforce_capacity = yes }");
    let err = SeatingConfig::load(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn missing_file_is_a_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SeatingConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
