// tests/config_tests.rs

use elfscout::{Config, ConfigStore};
use std::env;

#[test]
fn test_store_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::at(dir.path().join("config.json"));

    let data = store.load().unwrap();
    assert!(store.path().exists());
    assert_eq!(data.settings.get("checksec_bin").map(String::as_str), Some("checksec"));
    assert_eq!(data.settings.get("port").map(String::as_str), Some("8080"));
}

#[test]
fn test_store_migrates_missing_keys_without_clobbering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"settings":{"port":"9090"}}"#).unwrap();

    let store = ConfigStore::at(&path);
    let data = store.load().unwrap();

    // Existing value survives; missing defaults are inserted.
    assert_eq!(data.settings.get("port").map(String::as_str), Some("9090"));
    assert_eq!(data.settings.get("strings_bin").map(String::as_str), Some("strings"));

    // And the migration is persisted.
    let reread = std::fs::read_to_string(&path).unwrap();
    assert!(reread.contains("strings_bin"));
}

#[test]
fn test_get_and_set_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::at(dir.path().join("config.json"));

    store.set("checksec_bin", "/opt/checksec").unwrap();
    assert_eq!(
        store.get("checksec_bin").unwrap().as_deref(),
        Some("/opt/checksec")
    );
}

#[test]
fn test_config_resolves_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::at(dir.path().join("config.json"));
    store.set("logs_dir", "/tmp/elfscout-logs").unwrap();

    let config = Config::load(&store).unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.logs_dir, std::path::Path::new("/tmp/elfscout-logs"));
    assert_eq!(config.file_bin, "file");
    assert_eq!(config.tool_timeout_secs, 30);
}

#[test]
fn test_env_var_overrides_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::at(dir.path().join("config.json"));

    unsafe {
        env::set_var("NM_BIN", "/usr/local/bin/llvm-nm");
    }
    let config = Config::load(&store).unwrap();
    unsafe {
        env::remove_var("NM_BIN");
    }

    assert_eq!(config.nm_bin, "/usr/local/bin/llvm-nm");
}
