//! Unit tests for configuration loading and graceful degradation
//!
//! Tests cover:
//! - Missing or malformed TOML files never stop startup
//! - Unreadable files surface as I/O errors
//! - Priority order for data folder and proxy URL resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that touch BACKSTAGE_ROOT_FOLDER or BACKSTAGE_PROXY_URL are marked
//! with #[serial].

use backstage_common::config::{
    default_root_folder, resolve_proxy_url, resolve_root_folder, LoggingConfig, TomlConfig,
    DEFAULT_PROXY_URL, PROXY_URL_ENV, ROOT_FOLDER_ENV,
};
use backstage_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_parse_full_config() {
    let config = TomlConfig::parse(
        r#"
        root_folder = "/srv/backstage"
        proxy_url = "http://proxy.local:8080"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/backstage")));
    assert_eq!(config.proxy_url.as_deref(), Some("http://proxy.local:8080"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config = TomlConfig::parse("").unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_parse_malformed_config_is_error() {
    assert!(TomlConfig::parse("root_folder = [").is_err());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = TomlConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "proxy_url = 42\n[[[").unwrap();

    let err = TomlConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Parse TOML failed"));
}

#[test]
fn test_unreadable_file_is_io_error() {
    // A directory exists but cannot be read as text
    let dir = TempDir::new().unwrap();

    let err = TomlConfig::load(Some(dir.path())).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {:?}", err);

    let err = TomlConfig::read(&dir.path().join("absent.toml")).unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_valid_file_is_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = \"/data/bs\"\n").unwrap();

    let config = TomlConfig::load(Some(&path)).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/data/bs")));
}

#[test]
#[serial]
fn test_root_folder_cli_arg_wins() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/backstage-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/backstage-toml")),
        ..TomlConfig::default()
    };

    let root = resolve_root_folder(Some(Path::new("/tmp/backstage-cli")), &toml);
    assert_eq!(root, PathBuf::from("/tmp/backstage-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_root_folder_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/backstage-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/backstage-toml")),
        ..TomlConfig::default()
    };

    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/backstage-env"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_root_folder_toml_then_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/backstage-toml")),
        ..TomlConfig::default()
    };
    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/backstage-toml"));
    assert_eq!(
        resolve_root_folder(None, &TomlConfig::default()),
        default_root_folder()
    );
}

#[test]
#[serial]
fn test_proxy_url_resolution() {
    env::remove_var(PROXY_URL_ENV);
    let toml = TomlConfig {
        proxy_url: Some("http://toml:1".into()),
        ..TomlConfig::default()
    };

    assert_eq!(resolve_proxy_url(None, &TomlConfig::default()), DEFAULT_PROXY_URL);
    assert_eq!(resolve_proxy_url(None, &toml), "http://toml:1");

    env::set_var(PROXY_URL_ENV, "http://env:2");
    assert_eq!(resolve_proxy_url(None, &toml), "http://env:2");
    assert_eq!(resolve_proxy_url(Some("http://cli:3"), &toml), "http://cli:3");

    env::remove_var(PROXY_URL_ENV);
}
