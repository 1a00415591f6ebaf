// crates/testify-cli/src/messages.rs
// ============================================================================
// Module: CLI Messages
// Description: Typed user-facing messages printed by the testify binary.
// Purpose: Keep every status and error line of the CLI in one place.
// Dependencies: testify-core, testify-config
// ============================================================================

//! ## Overview
//! Each line the binary prints outside a report is a [`Message`] variant that
//! carries its typed inputs and renders through [`fmt::Display`]. Report bodies
//! come from the core renderers and never pass through here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;
use std::path::Path;

use testify_config::ConfigError;
use testify_core::RegistrationError;
use testify_core::SuiteError;
use testify_core::Tally;

use crate::suites::BuiltinSuite;

// ============================================================================
// SECTION: Streams
// ============================================================================

/// Destination a CLI write failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
    /// The `--output` report file.
    ReportFile,
}

impl Stream {
    /// Returns the label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::ReportFile => "report file",
        }
    }
}

// ============================================================================
// SECTION: Messages
// ============================================================================

/// A line printed by the CLI.
#[derive(Debug)]
pub enum Message<'a> {
    /// `--version` output.
    Version {
        /// Crate version.
        version: &'a str,
    },
    /// Writing to a stream failed.
    WriteFailed {
        /// Failing stream.
        stream: Stream,
        /// Underlying I/O error.
        error: &'a io::Error,
    },
    /// The config file could not be loaded or failed validation.
    ConfigLoadFailed {
        /// Config error.
        error: &'a ConfigError,
    },
    /// `config validate` succeeded.
    ConfigValid,
    /// The run event sink could not be opened.
    EventSinkFailed {
        /// Config error raised while building the sink.
        error: &'a ConfigError,
    },
    /// The `--output` file could not be created.
    ReportFileFailed {
        /// Requested path.
        path: &'a Path,
        /// Underlying I/O error.
        error: &'a io::Error,
    },
    /// A built-in suite failed to register its cases.
    SuiteBuildFailed {
        /// Suite being built.
        suite: BuiltinSuite,
        /// Registration error.
        error: &'a RegistrationError,
    },
    /// A suite run aborted.
    SuiteAborted {
        /// Aborted suite.
        suite: BuiltinSuite,
        /// Run error.
        error: &'a SuiteError,
    },
    /// Totals over every suite of one `run`.
    RunSummary {
        /// Number of suites run.
        suites: usize,
        /// Summed assertion counters.
        totals: Tally,
    },
    /// One line of `list`.
    ListEntry {
        /// Listed suite.
        suite: BuiltinSuite,
    },
    /// `list --json` could not be serialized.
    ListSerializeFailed {
        /// Serializer error.
        error: &'a serde_json::Error,
    },
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version {
                version,
            } => write!(f, "testify {version}"),
            Self::WriteFailed {
                stream,
                error,
            } => write!(f, "failed to write to {}: {error}", stream.label()),
            Self::ConfigLoadFailed {
                error,
            } => write!(f, "failed to load config: {error}"),
            Self::ConfigValid => f.write_str("config is valid"),
            Self::EventSinkFailed {
                error,
            } => write!(f, "failed to open run event log: {error}"),
            Self::ReportFileFailed {
                path,
                error,
            } => write!(f, "failed to create report file {}: {error}", path.display()),
            Self::SuiteBuildFailed {
                suite,
                error,
            } => write!(f, "suite {} could not be built: {error}", suite.name()),
            Self::SuiteAborted {
                suite,
                error,
            } => write!(f, "suite {} aborted: {error}", suite.name()),
            Self::RunSummary {
                suites,
                totals,
            } => write!(
                f,
                "{suites} suite(s) run: {} assertion(s) passed, {} failed.",
                totals.pass, totals.fail
            ),
            Self::ListEntry {
                suite,
            } => write!(f, "{}: {}", suite.name(), suite.title()),
            Self::ListSerializeFailed {
                error,
            } => write!(f, "failed to serialize suite list: {error}"),
        }
    }
}
