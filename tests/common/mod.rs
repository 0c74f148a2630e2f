/*!
 * Common test utilities for the vttsync test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use vttsync::app_config::Config;

/// Two-cue document used across the suite
pub const SIMPLE_VTT: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:02.500\nHello\n\n00:00:03.000 --> 00:00:04.000\nWorld\n";

/// A document in the shape auto-generated captions usually arrive in
pub const AUTO_CAPTIONS_VTT: &str = r#"WEBVTT
Kind: captions
Language: en

00:00:00.320 --> 00:00:02.150 align:start position:0%
so<00:00:00.640><c> today</c><00:00:01.120><c> we</c>

00:00:02.150 --> 00:00:04.000 align:start position:0%
are<00:00:02.400><c> testing</c>
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Config whose store lives inside `dir`
pub fn config_in(dir: &Path) -> Config {
    Config {
        store_path: dir.join("data").join("videos.json"),
        ..Config::default()
    }
}
