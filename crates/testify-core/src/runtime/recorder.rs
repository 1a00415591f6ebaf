// crates/testify-core/src/runtime/recorder.rs
// ============================================================================
// Module: Testify Assertion Recorder
// Description: Result stack for assertion outcomes and suite counters.
// Purpose: Record every assertion once, with call-site context, under its case.
// Dependencies: crate::core, crate::runtime::locator, indexmap
// ============================================================================

//! ## Overview
//! The recorder owns the result stack of one run: case results in
//! first-recorded order plus the suite tally. [`AssertionRecorder::record`]
//! builds the record before touching any counter and then appends and counts
//! in one step, so no outcome is ever half-recorded.
//!
//! Missing source text never fails a recording; the record carries an empty
//! `source_text` instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;

use crate::core::location::CallSite;
use crate::core::results::AssertionRecord;
use crate::core::results::CaseResult;
use crate::core::results::Outcome;
use crate::core::results::SuiteReport;
use crate::core::results::Tally;
use crate::runtime::locator::SourceLocator;
use crate::runtime::locator::SourceOptions;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path of this module as reported by the compiler.
pub(crate) const MODULE_FILE: &str = file!();

/// Kind label used when an assertion supplies an empty label.
pub const DEFAULT_KIND: &str = "True";

// ============================================================================
// SECTION: Recorder
// ============================================================================

/// Result stack for one suite run.
#[derive(Debug, Default)]
pub struct AssertionRecorder {
    /// Case results keyed by case name, in first-recorded order.
    cases: IndexMap<String, CaseResult>,
    /// Suite-wide counters.
    totals: Tally,
    /// Call-site resolver with its per-run file cache.
    locator: SourceLocator,
    /// Site reported for records raised from inside the framework.
    fallback_site: Option<CallSite>,
}

impl AssertionRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new(options: SourceOptions) -> Self {
        Self {
            cases: IndexMap::new(),
            totals: Tally::default(),
            locator: SourceLocator::new(options),
            fallback_site: None,
        }
    }

    /// Sets the site used for records raised from inside the framework.
    pub const fn set_fallback_site(&mut self, site: Option<CallSite>) {
        self.fallback_site = site;
    }

    /// Records one assertion outcome under `case` and returns `passed`.
    pub fn record(&mut self, case: &str, passed: bool, kind: &str, site: CallSite) -> bool {
        let location = self.locator.locate(site, self.fallback_site);
        let outcome = Outcome::from(passed);
        let record = AssertionRecord {
            kind: if kind.is_empty() { DEFAULT_KIND.to_string() } else { kind.to_string() },
            outcome,
            source_file: location.file,
            source_line: location.line,
            source_text: location.source_text,
        };

        match self.cases.get_mut(case) {
            Some(result) => result.push(record),
            None => {
                let mut result = CaseResult::new(case);
                result.push(record);
                self.cases.insert(case.to_string(), result);
            }
        }
        self.totals.count(outcome);
        passed
    }

    /// Returns the suite-wide counters.
    #[must_use]
    pub const fn totals(&self) -> Tally {
        self.totals
    }

    /// Returns the result recorded under `case`.
    #[must_use]
    pub fn case(&self, case: &str) -> Option<&CaseResult> {
        self.cases.get(case)
    }

    /// Returns every case result in report order.
    #[must_use]
    pub const fn cases(&self) -> &IndexMap<String, CaseResult> {
        &self.cases
    }

    /// Returns the locator used for call sites.
    #[must_use]
    pub const fn locator(&self) -> &SourceLocator {
        &self.locator
    }

    /// Consumes the recorder into the final report for `title`.
    #[must_use]
    pub fn into_report(self, title: impl Into<String>) -> SuiteReport {
        SuiteReport {
            title: title.into(),
            totals: self.totals,
            cases: self.cases,
        }
    }
}
