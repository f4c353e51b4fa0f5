//! Tests for config module

use std::path::PathBuf;
use tally::config::{expand_tilde, Config};
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.engine.locale, "en_US");
    assert_eq!(config.engine.terms_size, 10);
    assert_eq!(config.engine.histogram_size, 50);
    assert_eq!(config.engine.date_histogram_size, 100);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
    assert!(config.logging.file.is_none());
}

#[test]
fn test_expand_tilde() {
    let home = dirs::home_dir().unwrap();

    let expanded = expand_tilde(&PathBuf::from("~/foo")).unwrap();
    assert_eq!(expanded, home.join("foo"));

    let expanded = expand_tilde(&PathBuf::from("~")).unwrap();
    assert_eq!(expanded, home);

    let expanded = expand_tilde(&PathBuf::from("/absolute/path")).unwrap();
    assert_eq!(expanded, PathBuf::from("/absolute/path"));
}

#[test]
fn test_load_from_empty_dir() {
    let temp = tempdir().unwrap();
    let config = Config::load_from(temp.path()).unwrap();
    assert_eq!(config.engine.locale, "en_US");
}

#[test]
fn test_save_and_load() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.toml");

    let mut config = Config::default();
    config.engine.locale = "fr_FR".to_string();
    config.engine.terms_size = 25;
    config.logging.level = "debug".to_string();

    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.engine.locale, "fr_FR");
    assert_eq!(loaded.engine.terms_size, 25);
    assert_eq!(loaded.engine.histogram_size, 50);
    assert_eq!(loaded.logging.level, "debug");
}

#[test]
fn test_load_or_create_writes_defaults() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("nested/config.toml");

    let config = Config::load_or_create(&config_path).unwrap();
    assert_eq!(config.engine.terms_size, 10);
    assert!(config_path.exists());
}

#[test]
fn test_parse_toml() {
    let toml_content = r#"
[engine]
locale = "de_DE"
date_histogram_size = 12

[logging]
level = "trace"
format = "json"
file = "/var/log/tally.log"
"#;

    let config: Config = toml::from_str(toml_content).unwrap();

    assert_eq!(config.engine.locale, "de_DE");
    assert_eq!(config.engine.terms_size, 10);
    assert_eq!(config.engine.date_histogram_size, 12);
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.file, Some(PathBuf::from("/var/log/tally.log")));
}

#[test]
fn test_engine_options_from_config() {
    let mut config = Config::default();
    config.engine.terms_size = 3;
    let options = config.engine.options().unwrap();
    assert_eq!(options.terms_size, 3);
    assert!(matches!(options.locale, chrono::Locale::en_US));

    config.engine.locale = "xx_NOPE".to_string();
    assert!(config.engine.options().is_err());
}
