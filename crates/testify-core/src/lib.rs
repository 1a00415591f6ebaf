// crates/testify-core/src/lib.rs
// ============================================================================
// Module: Testify Core Library
// Description: Micro test-suite runner with call-site aware assertion records.
// Purpose: Register cases, run them with hooks, and render pass/fail reports.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Testify runs a titled [`Suite`] of named test cases in registration order
//! with optional `before`, `after`, `before_each`, and `after_each` hooks.
//! Every assertion made through [`TestContext`] is recorded with its verdict,
//! label, and the caller's file, line, and source text. The finished
//! [`SuiteReport`] renders as terminal text or HTML.
//!
//! Invariants:
//! - Each record is counted exactly once in its case tally and in the suite
//!   tally.
//! - Cases and records keep execution order.
//! - A failing test body never aborts the suite; a failing `before` or
//!   `after` hook does.
//!
//! ```
//! use testify_core::ReportOptions;
//! use testify_core::Suite;
//! use testify_core::render;
//!
//! let mut suite = Suite::new("Arithmetic");
//! suite.test("addition", |t| {
//!     t.assert_equal(2 + 2, 4);
//!     t.assert_identical(1024, 2_i64.pow(10));
//!     Ok(())
//! })?;
//! let report = suite.run()?;
//! assert_eq!(report.totals.pass, 2);
//! let _text = render(&report, &ReportOptions::default());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::AssertionRecord;
pub use crate::core::CallSite;
pub use crate::core::CaseResult;
pub use crate::core::DataBag;
pub use crate::core::ObjectValue;
pub use crate::core::Outcome;
pub use crate::core::SourceLocation;
pub use crate::core::StructuredReport;
pub use crate::core::SuiteReport;
pub use crate::core::Tally;
pub use crate::core::TestValue;
pub use crate::interfaces::RunEventSink;
pub use crate::runtime::AFTER_CASE;
pub use crate::runtime::AssertionRecorder;
pub use crate::runtime::BEFORE_CASE;
pub use crate::runtime::BodyResult;
pub use crate::runtime::Color;
pub use crate::runtime::DEFAULT_KIND;
pub use crate::runtime::DEFAULT_MAX_SOURCE_BYTES;
pub use crate::runtime::FileLineCache;
pub use crate::runtime::FileRunEventSink;
pub use crate::runtime::HookKind;
pub use crate::runtime::InMemoryRunEventSink;
pub use crate::runtime::LocatorError;
pub use crate::runtime::NoopRunEventSink;
pub use crate::runtime::RegistrationError;
pub use crate::runtime::ReportFormat;
pub use crate::runtime::ReportOptions;
pub use crate::runtime::RunEvent;
pub use crate::runtime::SourceLocator;
pub use crate::runtime::SourceOptions;
pub use crate::runtime::StderrRunEventSink;
pub use crate::runtime::Suite;
pub use crate::runtime::SuiteError;
pub use crate::runtime::SuiteState;
pub use crate::runtime::TestBody;
pub use crate::runtime::TestContext;
pub use crate::runtime::colorize;
pub use crate::runtime::identical;
pub use crate::runtime::is_member;
pub use crate::runtime::loose_equal;
pub use crate::runtime::render;
pub use crate::runtime::render_html;
pub use crate::runtime::render_text;
pub use crate::runtime::truthy;

// ============================================================================
// SECTION: Value Macros
// ============================================================================

/// Builds a [`TestValue::List`] from heterogeneous items.
///
/// ```
/// use testify_core::TestValue;
/// use testify_core::values;
///
/// let list = values![1, 2, (), false, "1", "2"];
/// assert_eq!(list, TestValue::list([
///     TestValue::Int(1),
///     TestValue::Int(2),
///     TestValue::Null,
///     TestValue::Bool(false),
///     TestValue::from("1"),
///     TestValue::from("2"),
/// ]));
/// ```
#[macro_export]
macro_rules! values {
    ($($item:expr),* $(,)?) => {
        $crate::TestValue::List(::std::vec![$($crate::TestValue::from($item)),*])
    };
}
