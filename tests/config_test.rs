//! Integration tests for Settings loading from explicit config files.
//!
//! These tests never touch the global config. Environment overrides live in
//! `config_env_test.rs` because the process environment is shared between tests.

use std::fs;

use tempfile::TempDir;

use foodweb::config::{DisplayStyle, Settings, SettingsError};
use foodweb::domain::NameMatch;

#[test]
fn given_config_file_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foodweb.toml");
    fs::write(
        &path,
        r#"
[tree]
remove_ignores_case = false

[display]
style = "tree"
indent = "    "
"#,
    )
    .unwrap();

    let settings = Settings::load_file(&path).expect("load settings");

    assert_eq!(settings.tree.removal_match(), NameMatch::Exact);
    assert_eq!(settings.display.style, DisplayStyle::Tree);
    assert_eq!(settings.display.indent, "    ");
    assert!(settings.display.color, "unspecified keys keep defaults");
}

#[test]
fn given_empty_config_file_when_loading_then_equals_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foodweb.toml");
    fs::write(&path, "").unwrap();

    let settings = Settings::load_file(&path).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_explicit_file_when_loading_then_read_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(SettingsError::Read { .. })));
}

#[test]
fn given_malformed_file_when_loading_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[display\nstyle = ").unwrap();

    let err = Settings::load_file(&path).unwrap_err();

    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}
