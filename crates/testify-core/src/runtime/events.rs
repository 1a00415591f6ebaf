// crates/testify-core/src/runtime/events.rs
// ============================================================================
// Module: Testify Run Events
// Description: Structured run events and their sinks.
// Purpose: Emit JSON-line run logs without hard logging dependencies.
// Dependencies: crate::interfaces, serde, serde_json
// ============================================================================

//! ## Overview
//! The runner reports lifecycle milestones as [`RunEvent`]s. Sinks serialize
//! them as JSON lines (stderr or an append-only file), keep them in memory
//! for inspection, or drop them. Write failures are ignored so logging can
//! never change a run's results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::results::Tally;
use crate::interfaces::RunEventSink;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One structured run event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Suite title.
    pub suite: String,
    /// Test-case name when the event concerns one case.
    pub case: Option<String>,
    /// Failure or hook message when present.
    pub message: Option<String>,
    /// Passing assertions counted so far for the event scope.
    pub pass: u64,
    /// Failing assertions counted so far for the event scope.
    pub fail: u64,
}

impl RunEvent {
    /// Builds an event with zero counters.
    fn new(event: &'static str, suite: &str) -> Self {
        Self {
            event,
            timestamp_ms: now_ms(),
            suite: suite.to_string(),
            case: None,
            message: None,
            pass: 0,
            fail: 0,
        }
    }

    /// The run has started.
    #[must_use]
    pub fn suite_started(suite: &str) -> Self {
        Self::new("suite_started", suite)
    }

    /// A test case is about to run.
    #[must_use]
    pub fn case_started(suite: &str, case: &str) -> Self {
        Self {
            case: Some(case.to_string()),
            ..Self::new("case_started", suite)
        }
    }

    /// A test body failed and the failure was contained.
    #[must_use]
    pub fn case_error(suite: &str, case: &str, message: &str) -> Self {
        Self {
            case: Some(case.to_string()),
            message: Some(message.to_string()),
            ..Self::new("case_error", suite)
        }
    }

    /// A test case finished with the given case tally.
    #[must_use]
    pub fn case_finished(suite: &str, case: &str, tally: Tally) -> Self {
        Self {
            case: Some(case.to_string()),
            pass: tally.pass,
            fail: tally.fail,
            ..Self::new("case_finished", suite)
        }
    }

    /// A `before` or `after` hook failed and the run was aborted.
    #[must_use]
    pub fn setup_hook_failed(suite: &str, hook: &str, message: &str) -> Self {
        Self {
            case: Some(hook.to_string()),
            message: Some(message.to_string()),
            ..Self::new("setup_hook_failed", suite)
        }
    }

    /// The run finished with the given suite totals.
    #[must_use]
    pub fn suite_finished(suite: &str, totals: Tally) -> Self {
        Self {
            pass: totals.pass,
            fail: totals.fail,
            ..Self::new("suite_finished", suite)
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
pub struct StderrRunEventSink;

impl RunEventSink for StderrRunEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that logs JSON lines to a file.
pub struct FileRunEventSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileRunEventSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RunEventSink for FileRunEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct InMemoryRunEventSink {
    /// Recorded events in emission order.
    events: Mutex<Vec<RunEvent>>,
}

impl InMemoryRunEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the recorded event identifiers in order.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).iter().map(|event| event.event).collect()
    }
}

impl RunEventSink for InMemoryRunEventSink {
    fn record(&self, event: &RunEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}

/// No-op sink.
pub struct NoopRunEventSink;

impl RunEventSink for NoopRunEventSink {
    fn record(&self, _event: &RunEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
