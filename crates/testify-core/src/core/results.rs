// crates/testify-core/src/core/results.rs
// ============================================================================
// Module: Testify Results
// Description: Assertion records, per-case results, and suite snapshots.
// Purpose: Define the data recorded by assertions and consumed by renderers.
// Dependencies: indexmap, serde
// ============================================================================

//! ## Overview
//! Results are append-only during a run. Every [`AssertionRecord`] belongs to
//! exactly one [`CaseResult`] and is counted exactly once in that case's
//! [`Tally`] and in the suite tally. Once a run completes the recorder hands
//! out a [`SuiteReport`], which renderers treat as read-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Outcome of a single assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The assertion held.
    Pass,
    /// The assertion did not hold.
    Fail,
}

impl Outcome {
    /// Returns the stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    /// Returns true when the outcome is a pass.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl From<bool> for Outcome {
    fn from(value: bool) -> Self {
        if value { Self::Pass } else { Self::Fail }
    }
}

/// Pass/fail counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Number of passing assertions.
    pub pass: u64,
    /// Number of failing assertions.
    pub fail: u64,
}

impl Tally {
    /// Counts one outcome.
    pub const fn count(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.pass += 1,
            Outcome::Fail => self.fail += 1,
        }
    }

    /// Returns the number of counted assertions.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.pass + self.fail
    }

    /// Returns true when at least one assertion failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.fail > 0
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// One recorded assertion. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionRecord {
    /// Label of the assertion that produced the record.
    pub kind: String,
    /// Pass or fail.
    pub outcome: Outcome,
    /// Base file name of the call site.
    pub source_file: String,
    /// One-based line of the call site.
    pub source_line: u32,
    /// Trimmed text of the call-site line; empty when unavailable.
    pub source_text: String,
}

/// Results recorded under one test-case name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    /// Test-case name (also the key in the suite map).
    #[serde(skip)]
    pub name: String,
    /// Case-local counters.
    #[serde(flatten)]
    pub tally: Tally,
    /// Records in the order the assertions executed.
    pub tests: Vec<AssertionRecord>,
}

impl CaseResult {
    /// Creates an empty result for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tally: Tally::default(),
            tests: Vec::new(),
        }
    }

    /// Appends a record and counts its outcome.
    pub(crate) fn push(&mut self, record: AssertionRecord) {
        self.tally.count(record.outcome);
        self.tests.push(record);
    }
}

// ============================================================================
// SECTION: Suite Snapshots
// ============================================================================

/// Final results of one suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    /// Suite title.
    pub title: String,
    /// Suite-wide counters.
    pub totals: Tally,
    /// Case results in first-recorded order.
    pub cases: IndexMap<String, CaseResult>,
}

impl SuiteReport {
    /// Returns the read-only view handed to structured renderers.
    #[must_use]
    pub fn structured(&self) -> StructuredReport<'_> {
        StructuredReport {
            title: &self.title,
            totals: self.totals,
            cases: &self.cases,
        }
    }

    /// Returns true when any assertion failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.totals.has_failures()
    }
}

/// Borrowed snapshot of a finished suite: title, totals, ordered cases.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StructuredReport<'a> {
    /// Suite title.
    pub title: &'a str,
    /// Suite-wide counters.
    pub totals: Tally,
    /// Case results keyed by case name, in report order.
    pub cases: &'a IndexMap<String, CaseResult>,
}
