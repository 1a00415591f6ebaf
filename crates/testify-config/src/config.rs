// crates/testify-config/src/config.rs
// ============================================================================
// Module: Testify Configuration
// Description: Configuration loading and validation for testify runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: testify-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Resolution order: explicit path, then `TESTIFY_CONFIG`, then
//! `testify.toml` in the working directory. Only the default file may be
//! absent; an absent default file yields the defaults. Unknown fields are
//! rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use testify_core::DEFAULT_MAX_SOURCE_BYTES;
use testify_core::FileRunEventSink;
use testify_core::NoopRunEventSink;
use testify_core::ReportFormat;
use testify_core::ReportOptions;
use testify_core::RunEventSink;
use testify_core::SourceOptions;
use testify_core::StderrRunEventSink;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "testify.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "TESTIFY_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `source.max_file_bytes`.
pub const MAX_SOURCE_FILE_LIMIT: u64 = 64 * 1024 * 1024;
/// Maximum number of source roots.
pub const MAX_SOURCE_ROOTS: usize = 64;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Top-level testify configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestifyConfig {
    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Call-site source resolution settings.
    #[serde(default)]
    pub source: SourceConfig,
    /// Run event logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TestifyConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, required) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !required && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Returns the call-site resolution settings for suites.
    #[must_use]
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            roots: self.source.roots.iter().map(|root| PathBuf::from(root.trim())).collect(),
            max_file_bytes: self.source.max_file_bytes,
        }
    }

    /// Returns the report rendering settings.
    #[must_use]
    pub const fn report_options(&self) -> ReportOptions {
        ReportOptions {
            format: self.report.format,
            color: self.report.color,
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
    /// Emit ANSI colour escapes in text output.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            color: default_color(),
        }
    }
}

/// Call-site source resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Directories used to resolve relative call-site paths.
    #[serde(default)]
    pub roots: Vec<String>,
    /// Source files larger than this are reported without source text.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl SourceConfig {
    /// Validates root paths and the file size limit.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes == 0 {
            return Err(ConfigError::Invalid(
                "source.max_file_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_file_bytes > MAX_SOURCE_FILE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "source.max_file_bytes must be at most {MAX_SOURCE_FILE_LIMIT}"
            )));
        }
        if self.roots.len() > MAX_SOURCE_ROOTS {
            return Err(ConfigError::Invalid(format!(
                "source.roots must contain at most {MAX_SOURCE_ROOTS} entries"
            )));
        }
        for root in &self.roots {
            validate_path_string("source.roots", root)?;
        }
        Ok(())
    }
}

/// Run event sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSinkKind {
    /// Drop run events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `logging.path`.
    File,
}

/// Run event logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: LogSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl LoggingConfig {
    /// Validates the sink/path pairing.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (LogSinkKind::File, None) => {
                Err(ConfigError::Invalid("logging.path is required when sink = \"file\"".to_string()))
            }
            (LogSinkKind::File, Some(path)) => validate_path_string("logging.path", path),
            (_, Some(_)) => {
                Err(ConfigError::Invalid("logging.path requires sink = \"file\"".to_string()))
            }
            (_, None) => Ok(()),
        }
    }

    /// Builds the configured run event sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the log file cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn RunEventSink>, ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (LogSinkKind::None, _) => Ok(Arc::new(NoopRunEventSink)),
            (LogSinkKind::Stderr, _) => Ok(Arc::new(StderrRunEventSink)),
            (LogSinkKind::File, Some(path)) => FileRunEventSink::new(Path::new(path.trim()))
                .map(|sink| Arc::new(sink) as Arc<dyn RunEventSink>)
                .map_err(|err| ConfigError::Io(err.to_string())),
            (LogSinkKind::File, None) => {
                Err(ConfigError::Invalid("logging.path is required when sink = \"file\"".to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `report.color`.
const fn default_color() -> bool {
    true
}

/// Default for `source.max_file_bytes`.
const fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_SOURCE_BYTES
}

/// Resolves the config path from CLI or environment defaults.
///
/// The flag is true when the file must exist.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
