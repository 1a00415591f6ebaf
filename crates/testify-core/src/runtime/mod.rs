// crates/testify-core/src/runtime/mod.rs
// ============================================================================
// Module: Testify Runtime
// Description: Comparison, call-site resolution, recording, running, rendering.
// Purpose: Group the behavior that turns registered tests into a report.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime components, leaf first: [`comparator`] and [`locator`] have no
//! runtime dependencies, [`recorder`] resolves call sites through the
//! locator, [`runner`] drives hooks and bodies against the recorder, and
//! [`report`] renders the finished results. [`events`] carries the run log.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod comparator;
pub mod events;
pub mod locator;
pub mod recorder;
pub mod report;
pub mod runner;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use comparator::identical;
pub use comparator::is_member;
pub use comparator::loose_equal;
pub use comparator::truthy;
pub use events::FileRunEventSink;
pub use events::InMemoryRunEventSink;
pub use events::NoopRunEventSink;
pub use events::RunEvent;
pub use events::StderrRunEventSink;
pub use locator::DEFAULT_MAX_SOURCE_BYTES;
pub use locator::FileLineCache;
pub use locator::LocatorError;
pub use locator::SourceLocator;
pub use locator::SourceOptions;
pub use recorder::AssertionRecorder;
pub use recorder::DEFAULT_KIND;
pub use report::Color;
pub use report::ReportFormat;
pub use report::ReportOptions;
pub use report::colorize;
pub use report::render;
pub use report::render_html;
pub use report::render_text;
pub use runner::AFTER_CASE;
pub use runner::BEFORE_CASE;
pub use runner::BodyResult;
pub use runner::HookKind;
pub use runner::RegistrationError;
pub use runner::Suite;
pub use runner::SuiteError;
pub use runner::SuiteState;
pub use runner::TestBody;
pub use runner::TestContext;
