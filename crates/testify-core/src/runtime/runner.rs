// crates/testify-core/src/runtime/runner.rs
// ============================================================================
// Module: Testify Suite Runner
// Description: Test registration, hook orchestration, and the assertion API.
// Purpose: Execute registered cases in order and contain per-case failures.
// Dependencies: crate::core, crate::runtime::{comparator, recorder, report}
// ============================================================================

//! ## Overview
//! A [`Suite`] moves through `Building -> Running -> Reporting -> Done`.
//! Tests and hooks are registered while building; [`Suite::run`] executes
//! `before`, then every case (`before_each`, body, `after_each`) in
//! registration order, then `after`, and returns the finished
//! [`SuiteReport`].
//!
//! Failure containment:
//! - An `Err` or panic inside `before_each`, a body, or `after_each` is
//!   recorded as one failing assertion labelled with the error message and
//!   the run moves on to the next case.
//! - An `Err` or panic inside `before` or `after` aborts the run with
//!   [`SuiteError::SetupHook`] and leaves the suite `Done`.
//!
//! Assertions made inside `before` and `after` are recorded under the
//! reserved case names [`BEFORE_CASE`] and [`AFTER_CASE`].
//!
//! Test bodies see the suite only through [`TestContext`], which exposes the
//! assertion API and the data bag but no registration, so a running suite
//! cannot change its own case list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::io::Write;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::sync::Arc;

use thiserror::Error;

use crate::core::data::DataBag;
use crate::core::location::CallSite;
use crate::core::results::SuiteReport;
use crate::core::results::Tally;
use crate::core::value::TestValue;
use crate::interfaces::RunEventSink;
use crate::runtime::comparator::identical;
use crate::runtime::comparator::is_member;
use crate::runtime::comparator::loose_equal;
use crate::runtime::comparator::truthy;
use crate::runtime::events::NoopRunEventSink;
use crate::runtime::events::RunEvent;
use crate::runtime::locator::SourceOptions;
use crate::runtime::recorder::AssertionRecorder;
use crate::runtime::report::ReportOptions;
use crate::runtime::report::render;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path of this module as reported by the compiler.
pub(crate) const MODULE_FILE: &str = file!();

/// Case name for assertions made inside the `before` hook.
pub const BEFORE_CASE: &str = "before";
/// Case name for assertions made inside the `after` hook.
pub const AFTER_CASE: &str = "after";

/// Label of [`TestContext::assert_true`] records.
pub const TRUE_KIND: &str = "True";
/// Label of [`TestContext::assert_false`] records.
pub const FALSE_KIND: &str = "False";
/// Label of [`TestContext::assert_equal`] records.
pub const EQUAL_KIND: &str = "Equal";
/// Label of [`TestContext::assert_identical`] records.
pub const IDENTICAL_KIND: &str = "Identical";
/// Label of [`TestContext::assert_in_array`] records.
pub const IN_ARRAY_KIND: &str = "InArray";
/// Label of [`TestContext::assert_not_in_array`] records.
pub const NOT_IN_ARRAY_KIND: &str = "NotInArray";
/// Label of [`TestContext::pass`] records.
pub const PASS_KIND: &str = "Pass";
/// Label of [`TestContext::fail`] records and of contained failures with an
/// empty message.
pub const FAIL_KIND: &str = "Fail";

/// Prefix of generated case names.
const UNNAMED_PREFIX: &str = "Test Case #";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Result returned by test bodies and hooks.
pub type BodyResult = Result<(), Box<dyn StdError>>;

/// Boxed test body or hook.
pub type TestBody = Box<dyn FnMut(&mut TestContext<'_>) -> BodyResult>;

/// Lifecycle state of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteState {
    /// Tests and hooks are being registered.
    Building,
    /// Hooks and test bodies are executing.
    Running,
    /// All cases ran; the report is being assembled.
    Reporting,
    /// The run finished or was aborted.
    Done,
}

impl SuiteState {
    /// Returns the stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Running => "running",
            Self::Reporting => "reporting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SuiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Runs once before the first case.
    Before,
    /// Runs once after the last case.
    After,
    /// Runs before every case body.
    BeforeEach,
    /// Runs after every case body that succeeded.
    AfterEach,
}

impl HookKind {
    /// Returns the hook name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::BeforeEach => "beforeEach",
            Self::AfterEach => "afterEach",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A test or hook could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Registration happened after the suite started running.
    #[error("cannot register {target} while suite is {state}")]
    NotBuilding {
        /// What was being registered.
        target: String,
        /// Current suite state.
        state: SuiteState,
    },
    /// A test case with the same name already exists.
    #[error("duplicate test case name: {name}")]
    DuplicateCase {
        /// Conflicting name.
        name: String,
    },
    /// The test case name is empty.
    #[error("test case name must not be empty")]
    EmptyName,
    /// The name is reserved for assertions made in the `before`/`after` hooks.
    #[error("test case name is reserved for hook results: {name}")]
    ReservedName {
        /// Rejected name.
        name: String,
    },
}

/// A suite run could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiteError {
    /// The `before` or `after` hook failed; the run was aborted.
    #[error("{hook} hook failed: {message}")]
    SetupHook {
        /// Failing hook.
        hook: HookKind,
        /// Error message reported by the hook.
        message: String,
    },
    /// `run` was invoked on a suite that is not building.
    #[error("suite cannot run while {state}")]
    AlreadyRun {
        /// Current suite state.
        state: SuiteState,
    },
    /// The rendered report could not be written.
    #[error("report output failed: {0}")]
    Output(String),
}

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Registered test case.
struct RegisteredTest {
    /// Case name.
    name: String,
    /// Case body.
    body: TestBody,
}

/// A titled collection of test cases with lifecycle hooks.
pub struct Suite {
    /// Suite title.
    title: String,
    /// Test cases in registration order.
    tests: Vec<RegisteredTest>,
    /// Hook run once before the first case.
    before: Option<TestBody>,
    /// Hook run once after the last case.
    after: Option<TestBody>,
    /// Hook run before every case.
    before_each: Option<TestBody>,
    /// Hook run after every successful case body.
    after_each: Option<TestBody>,
    /// State shared by hooks and bodies.
    data: DataBag,
    /// Lifecycle state.
    state: SuiteState,
    /// Call-site resolution settings.
    source: SourceOptions,
    /// Run event destination.
    events: Arc<dyn RunEventSink>,
}

impl Suite {
    /// Creates an empty suite in the `Building` state.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tests: Vec::new(),
            before: None,
            after: None,
            before_each: None,
            after_each: None,
            data: DataBag::new(),
            state: SuiteState::Building,
            source: SourceOptions::default(),
            events: Arc::new(NoopRunEventSink),
        }
    }

    /// Sets the call-site resolution settings.
    #[must_use]
    pub fn with_source_options(mut self, options: SourceOptions) -> Self {
        self.source = options;
        self
    }

    /// Sets the run event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn RunEventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Registers a named test case.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when the suite is not building, the name
    /// is empty or reserved, or the name is already registered.
    pub fn test<F>(&mut self, name: impl Into<String>, body: F) -> Result<&mut Self, RegistrationError>
    where
        F: FnMut(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        let name = name.into();
        self.ensure_building(&name)?;
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        if name == BEFORE_CASE || name == AFTER_CASE {
            return Err(RegistrationError::ReservedName {
                name,
            });
        }
        if self.tests.iter().any(|test| test.name == name) {
            return Err(RegistrationError::DuplicateCase {
                name,
            });
        }
        self.tests.push(RegisteredTest {
            name,
            body: Box::new(body),
        });
        Ok(self)
    }

    /// Registers a test case named `Test Case #<n>`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when the suite is not building or the
    /// generated name is already taken.
    pub fn test_unnamed<F>(&mut self, body: F) -> Result<&mut Self, RegistrationError>
    where
        F: FnMut(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        let name = format!("{UNNAMED_PREFIX}{}", self.tests.len() + 1);
        self.test(name, body)
    }

    /// Sets the hook run once before the first case.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotBuilding`] after the run started.
    pub fn before<F>(&mut self, hook: F) -> Result<&mut Self, RegistrationError>
    where
        F: FnMut(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        self.set_hook(HookKind::Before, Box::new(hook))
    }

    /// Sets the hook run once after the last case.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotBuilding`] after the run started.
    pub fn after<F>(&mut self, hook: F) -> Result<&mut Self, RegistrationError>
    where
        F: FnMut(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        self.set_hook(HookKind::After, Box::new(hook))
    }

    /// Sets the hook run before every case.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotBuilding`] after the run started.
    pub fn before_each<F>(&mut self, hook: F) -> Result<&mut Self, RegistrationError>
    where
        F: FnMut(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        self.set_hook(HookKind::BeforeEach, Box::new(hook))
    }

    /// Sets the hook run after every successful case body.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotBuilding`] after the run started.
    pub fn after_each<F>(&mut self, hook: F) -> Result<&mut Self, RegistrationError>
    where
        F: FnMut(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        self.set_hook(HookKind::AfterEach, Box::new(hook))
    }

    /// Returns the suite title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SuiteState {
        self.state
    }

    /// Returns the registered case names in order.
    #[must_use]
    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().map(|test| test.name.as_str()).collect()
    }

    /// Returns true when `hook` is set.
    #[must_use]
    pub const fn has_hook(&self, hook: HookKind) -> bool {
        match hook {
            HookKind::Before => self.before.is_some(),
            HookKind::After => self.after.is_some(),
            HookKind::BeforeEach => self.before_each.is_some(),
            HookKind::AfterEach => self.after_each.is_some(),
        }
    }

    /// Returns the data bag.
    #[must_use]
    pub const fn data(&self) -> &DataBag {
        &self.data
    }

    /// Returns the data bag for seeding fixtures before the run.
    pub const fn data_mut(&mut self) -> &mut DataBag {
        &mut self.data
    }

    /// Runs the suite once and returns its report.
    ///
    /// Records synthesized by the runner report this call site.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::AlreadyRun`] when the suite is not building and
    /// [`SuiteError::SetupHook`] when `before` or `after` returns an error or
    /// panics.
    #[track_caller]
    pub fn run(&mut self) -> Result<SuiteReport, SuiteError> {
        let run_site = CallSite::caller();
        if self.state != SuiteState::Building {
            return Err(SuiteError::AlreadyRun {
                state: self.state,
            });
        }
        self.state = SuiteState::Running;
        self.events.record(&RunEvent::suite_started(&self.title));

        let mut recorder = AssertionRecorder::new(self.source.clone());
        recorder.set_fallback_site(Some(run_site));

        if let Err(message) = invoke_hook(self.before.as_mut(), &mut recorder, BEFORE_CASE, &mut self.data) {
            return Err(self.abort(HookKind::Before, &message));
        }

        for test in &mut self.tests {
            let name = test.name.as_str();
            self.events.record(&RunEvent::case_started(&self.title, name));
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                invoke(self.before_each.as_mut(), &mut recorder, name, &mut self.data)?;
                invoke(Some(&mut test.body), &mut recorder, name, &mut self.data)?;
                invoke(self.after_each.as_mut(), &mut recorder, name, &mut self.data)
            }));
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(error)) => Some(error.to_string()),
                Err(payload) => Some(panic_message(payload.as_ref())),
            };
            if let Some(message) = failure {
                self.events.record(&RunEvent::case_error(&self.title, name, &message));
                let label = if message.is_empty() { FAIL_KIND } else { message.as_str() };
                TestContext::new(&mut recorder, name, &mut self.data).fail_as(label);
            }
            let tally = recorder.case(name).map(|result| result.tally).unwrap_or_default();
            self.events.record(&RunEvent::case_finished(&self.title, name, tally));
        }

        if let Err(message) = invoke_hook(self.after.as_mut(), &mut recorder, AFTER_CASE, &mut self.data) {
            return Err(self.abort(HookKind::After, &message));
        }

        self.state = SuiteState::Reporting;
        let report = recorder.into_report(self.title.clone());
        self.events.record(&RunEvent::suite_finished(&self.title, report.totals));
        self.state = SuiteState::Done;
        Ok(report)
    }

    /// Runs the suite and writes the rendered report to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when the run fails or the report cannot be
    /// written.
    #[track_caller]
    pub fn run_and_report<W: Write>(
        &mut self,
        out: &mut W,
        options: &ReportOptions,
    ) -> Result<SuiteReport, SuiteError> {
        let report = self.run()?;
        out.write_all(render(&report, options).as_bytes())
            .and_then(|()| out.flush())
            .map_err(|err| SuiteError::Output(err.to_string()))?;
        Ok(report)
    }

    /// Fails registration unless the suite is building.
    fn ensure_building(&self, target: &str) -> Result<(), RegistrationError> {
        if self.state == SuiteState::Building {
            return Ok(());
        }
        Err(RegistrationError::NotBuilding {
            target: target.to_string(),
            state: self.state,
        })
    }

    /// Stores `hook`, replacing any previous hook of the same kind.
    fn set_hook(&mut self, kind: HookKind, hook: TestBody) -> Result<&mut Self, RegistrationError> {
        self.ensure_building(kind.as_str())?;
        let slot = match kind {
            HookKind::Before => &mut self.before,
            HookKind::After => &mut self.after,
            HookKind::BeforeEach => &mut self.before_each,
            HookKind::AfterEach => &mut self.after_each,
        };
        *slot = Some(hook);
        Ok(self)
    }

    /// Ends an aborted run and builds the fatal error.
    fn abort(&mut self, hook: HookKind, message: &str) -> SuiteError {
        self.state = SuiteState::Done;
        self.events.record(&RunEvent::setup_hook_failed(&self.title, hook.as_str(), message));
        SuiteError::SetupHook {
            hook,
            message: message.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Test Context
// ============================================================================

/// Assertion API and data bag lent to hooks and test bodies.
#[derive(Debug)]
pub struct TestContext<'a> {
    /// Recorder of the current run.
    recorder: &'a mut AssertionRecorder,
    /// Name of the case assertions are recorded under.
    case: &'a str,
    /// Shared state bag.
    data: &'a mut DataBag,
}

impl<'a> TestContext<'a> {
    /// Creates a context recording under `case`.
    pub const fn new(recorder: &'a mut AssertionRecorder, case: &'a str, data: &'a mut DataBag) -> Self {
        Self {
            recorder,
            case,
            data,
        }
    }

    /// Returns the name of the current case.
    #[must_use]
    pub const fn case_name(&self) -> &str {
        self.case
    }

    /// Returns the data bag.
    #[must_use]
    pub const fn data(&self) -> &DataBag {
        self.data
    }

    /// Returns the data bag for mutation.
    pub const fn data_mut(&mut self) -> &mut DataBag {
        self.data
    }

    /// Passes when `value` is truthy.
    #[track_caller]
    pub fn assert_true(&mut self, value: impl Into<TestValue>) -> bool {
        let passed = truthy(&value.into());
        self.record_at(passed, TRUE_KIND, CallSite::caller())
    }

    /// Passes when `value` is falsy.
    #[track_caller]
    pub fn assert_false(&mut self, value: impl Into<TestValue>) -> bool {
        let passed = !truthy(&value.into());
        self.record_at(passed, FALSE_KIND, CallSite::caller())
    }

    /// Passes when the values are loosely equal.
    #[track_caller]
    pub fn assert_equal(&mut self, left: impl Into<TestValue>, right: impl Into<TestValue>) -> bool {
        let passed = loose_equal(&left.into(), &right.into());
        self.record_at(passed, EQUAL_KIND, CallSite::caller())
    }

    /// Passes when the values are identical.
    #[track_caller]
    pub fn assert_identical(
        &mut self,
        left: impl Into<TestValue>,
        right: impl Into<TestValue>,
    ) -> bool {
        let passed = identical(&left.into(), &right.into());
        self.record_at(passed, IDENTICAL_KIND, CallSite::caller())
    }

    /// Passes when `value` is loosely equal to an element of `collection`.
    #[track_caller]
    pub fn assert_in_array(
        &mut self,
        value: impl Into<TestValue>,
        collection: impl Into<TestValue>,
    ) -> bool {
        let passed = is_member(&value.into(), &collection.into());
        self.record_at(passed, IN_ARRAY_KIND, CallSite::caller())
    }

    /// Passes when no element of `collection` is loosely equal to `value`.
    #[track_caller]
    pub fn assert_not_in_array(
        &mut self,
        value: impl Into<TestValue>,
        collection: impl Into<TestValue>,
    ) -> bool {
        let passed = !is_member(&value.into(), &collection.into());
        self.record_at(passed, NOT_IN_ARRAY_KIND, CallSite::caller())
    }

    /// Records a passing assertion.
    #[track_caller]
    pub fn pass(&mut self) -> bool {
        self.record_at(true, PASS_KIND, CallSite::caller())
    }

    /// Records a failing assertion.
    #[track_caller]
    pub fn fail(&mut self) -> bool {
        self.record_at(false, FAIL_KIND, CallSite::caller())
    }

    /// Records a passing assertion under `label`.
    #[track_caller]
    pub fn pass_as(&mut self, label: &str) -> bool {
        self.record_at(true, label, CallSite::caller())
    }

    /// Records a failing assertion under `label`.
    #[track_caller]
    pub fn fail_as(&mut self, label: &str) -> bool {
        self.record_at(false, label, CallSite::caller())
    }

    /// Records `condition` under `label`.
    #[track_caller]
    pub fn check(&mut self, condition: bool, label: &str) -> bool {
        self.record_at(condition, label, CallSite::caller())
    }

    /// Records an outcome at an explicit call site.
    pub fn record_at(&mut self, passed: bool, label: &str, site: CallSite) -> bool {
        self.recorder.record(self.case, passed, label, site)
    }

    /// Returns the counters recorded so far for the current case.
    #[must_use]
    pub fn case_tally(&self) -> Tally {
        self.recorder.case(self.case).map(|result| result.tally).unwrap_or_default()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Invokes an optional body with a fresh context for `case`.
fn invoke(
    body: Option<&mut TestBody>,
    recorder: &mut AssertionRecorder,
    case: &str,
    data: &mut DataBag,
) -> BodyResult {
    let Some(body) = body else {
        return Ok(());
    };
    let mut context = TestContext::new(recorder, case, data);
    body(&mut context)
}

/// Invokes a `before`/`after` hook, folding errors and panics into a message.
fn invoke_hook(
    hook: Option<&mut TestBody>,
    recorder: &mut AssertionRecorder,
    case: &str,
    data: &mut DataBag,
) -> Result<(), String> {
    match catch_unwind(AssertUnwindSafe(|| invoke(hook, recorder, case, data))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(error.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

/// Extracts the message of a caught panic.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "test body panicked".to_string())
}
