/*!
 * Tests for application configuration
 */

use std::path::PathBuf;
use vttsync::app_config::{Config, LogLevel};

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.store_path, PathBuf::from("data").join("videos.json"));
    assert_eq!(config.captions.default_language, "en");
    assert_eq!(config.captions.offset_ms, 0);
    assert_eq!(config.provider.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{ "captions": { "default_language": "es", "offset_ms": -250 }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.captions.default_language, "es");
    assert_eq!(config.captions.offset_ms, -250);
    assert!(!config.captions.prefer_auto_generated);
    assert_eq!(config.provider.endpoint, "https://www.youtube.com");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_config_roundTrip_throughJson_shouldBeEqual() {
    let mut config = Config::default();
    config.captions.prefer_auto_generated = true;
    config.provider.timeout_secs = 5;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.captions.default_language = "klingon".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.provider.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.store_path = PathBuf::new();
    assert!(config.validate().is_err());
}
