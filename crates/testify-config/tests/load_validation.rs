// crates/testify-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: File resolution, size limits, encoding, and sink wiring.
// Purpose: Ensure config loading fails closed on bad inputs.
// =============================================================================

//! Config loading tests for testify-config.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Mutex;
use std::sync::OnceLock;

use testify_config::CONFIG_ENV_VAR;
use testify_config::LogSinkKind;
use testify_config::LoggingConfig;
use testify_config::MAX_CONFIG_FILE_SIZE;
use testify_config::TestifyConfig;
use testify_core::RunEvent;

mod common;

/// Result type for tests that report failures as messages.
type TestResult = Result<(), String>;

mod env_mut {
    #![allow(unsafe_code, reason = "Tests mutate process env vars in a controlled scope.")]

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

/// Serializes tests that mutate process environment variables.
fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[test]
fn explicit_path_loads_and_validates() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_config(dir.path(), "[report]\nformat = \"html\"\n").unwrap();
    let config = TestifyConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if !config.report.color {
        return Err("color should default to true".to_string());
    }
    Ok(())
}

#[test]
fn explicit_missing_path_is_an_error() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    common::assert_invalid(TestifyConfig::load(Some(&missing)), "config io error")
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let padding = format!("# {}\n", "x".repeat(MAX_CONFIG_FILE_SIZE));
    let path = common::write_config(dir.path(), &padding).unwrap();
    common::assert_invalid(TestifyConfig::load(Some(&path)), "config file exceeds size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testify.toml");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    common::assert_invalid(TestifyConfig::load(Some(&path)), "config file must be utf-8")
}

#[test]
fn parse_errors_are_reported() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_config(dir.path(), "[report\n").unwrap();
    common::assert_invalid(TestifyConfig::load(Some(&path)), "config parse error")
}

#[test]
fn validation_runs_on_load() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_config(dir.path(), "[source]\nmax_file_bytes = 0\n").unwrap();
    common::assert_invalid(TestifyConfig::load(Some(&path)), "source.max_file_bytes")
}

#[test]
fn env_var_overrides_default_and_must_exist() -> TestResult {
    let _guard = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_config(dir.path(), "[report]\ncolor = false\n").unwrap();

    env_mut::set_var(CONFIG_ENV_VAR, &path.to_string_lossy());
    let loaded = TestifyConfig::load(None).map_err(|err| err.to_string());
    env_mut::set_var(CONFIG_ENV_VAR, &dir.path().join("absent.toml").to_string_lossy());
    let missing = TestifyConfig::load(None);
    env_mut::remove_var(CONFIG_ENV_VAR);

    if loaded?.report.color {
        return Err("env config should disable color".to_string());
    }
    common::assert_invalid(missing, "config io error")
}

#[test]
fn file_sink_appends_json_lines() -> TestResult {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("events.jsonl");
    let logging = LoggingConfig {
        sink: LogSinkKind::File,
        path: Some(log_path.to_string_lossy().into_owned()),
    };
    let sink = logging.build_sink().map_err(|err| err.to_string())?;
    sink.record(&RunEvent::suite_started("Logged"));
    sink.record(&RunEvent::case_started("Logged", "first"));

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() != 2 || !lines[0].contains("\"event\":\"suite_started\"") {
        return Err(format!("unexpected log content: {content}"));
    }
    Ok(())
}
