// crates/testify-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for testify-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::path::Path;
use std::path::PathBuf;

use testify_config::ConfigError;
use testify_config::TestifyConfig;

/// Parses a TOML string into a `TestifyConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<TestifyConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<TestifyConfig, toml::de::Error> {
    config_from_toml("")
}

/// Writes `content` to `testify.toml` inside `dir` and returns its path.
pub fn write_config(dir: &Path, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("testify.toml");
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Checks that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
