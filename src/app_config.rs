/*!
 * Application configuration.
 *
 * Settings are read from a JSON file; every field has a serde default so a
 * partial file is valid. `Config::validate` checks the loaded values.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path of the JSON video store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Caption provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Caption import defaults
    #[serde(default)]
    pub captions: CaptionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Caption provider connection settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Service URL
    #[serde(default = "default_provider_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_provider_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Defaults applied when importing captions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaptionConfig {
    /// Language requested when none is given
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Require auto-generated tracks by default
    #[serde(default)]
    pub prefer_auto_generated: bool,

    /// Persisted offset in milliseconds, baked into imported cues
    #[serde(default)]
    pub offset_ms: i64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            prefer_auto_generated: false,
            offset_ms: 0,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data").join("videos.json")
}

fn default_provider_endpoint() -> String {
    "https://www.youtube.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("vttsync/{}", env!("CARGO_PKG_VERSION"))
}

fn default_language() -> String {
    "en".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(anyhow!("Store path must not be empty"));
        }

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be greater than zero"));
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(anyhow!("Provider endpoint must not be empty"));
        }

        crate::language_utils::validate_language_code(&self.captions.default_language)?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: default_store_path(),
            provider: ProviderConfig::default(),
            captions: CaptionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
