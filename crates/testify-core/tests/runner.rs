// crates/testify-core/tests/runner.rs
// ============================================================================
// Module: Suite Runner Tests
// Description: Lifecycle, hook ordering, failure containment, and events.
// Purpose: Ensure suites run cases in order and contain per-case failures.
// ============================================================================
//! ## Overview
//! Integration tests for the suite runner state machine.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use support::TestResult;
use support::ensure;
use support::failure;
use testify_core::AFTER_CASE;
use testify_core::BEFORE_CASE;
use testify_core::HookKind;
use testify_core::InMemoryRunEventSink;
use testify_core::RegistrationError;
use testify_core::Suite;
use testify_core::SuiteError;
use testify_core::SuiteState;
use testify_core::Tally;
use testify_core::TestValue;
use testify_core::values;

/// Shared call log for hook ordering tests.
type CallLog = Rc<RefCell<Vec<String>>>;

/// Returns a hook that appends `entry` to `log`.
fn logging(
    log: &CallLog,
    entry: &'static str,
) -> impl FnMut(&mut testify_core::TestContext<'_>) -> testify_core::BodyResult + 'static {
    let log = Rc::clone(log);
    move |t| {
        log.borrow_mut().push(format!("{entry}:{}", t.case_name()));
        Ok(())
    }
}

// ============================================================================
// SECTION: End-to-End Scenarios
// ============================================================================

#[test]
fn contained_error_becomes_one_failing_record() -> TestResult {
    let mut suite = Suite::new("Containment");
    suite.test("mixed", |t| {
        t.assert_equal(1, 1);
        t.assert_false(false);
        Err(failure("This is unexpected!"))
    })?;

    let report = suite.run()?;
    let case = report.cases.get("mixed").ok_or("missing case")?;
    ensure(case.tally == Tally { pass: 2, fail: 1 }, format!("case tally {:?}", case.tally))?;
    ensure(report.totals == Tally { pass: 2, fail: 1 }, "suite tally")?;
    let last = case.tests.last().ok_or("missing record")?;
    ensure(last.kind == "This is unexpected!", "error message is the label")?;
    ensure(last.source_file == "runner.rs", format!("attributed to run site, got {}", last.source_file))?;
    ensure(last.source_text == "let report = suite.run()?;", format!("run site text, got {:?}", last.source_text))?;
    ensure(suite.state() == SuiteState::Done, "suite is done")
}

#[test]
fn zero_tests_yield_empty_report() -> TestResult {
    let mut suite = Suite::new("Empty");
    let report = suite.run()?;
    ensure(report.totals == Tally::default(), "zero totals")?;
    ensure(report.cases.is_empty(), "no cases")?;
    ensure(report.title == "Empty", "title")
}

#[test]
fn panics_are_contained_and_suite_continues() -> TestResult {
    let mut suite = Suite::new("Panics");
    suite
        .test("explodes", |t| {
            let empty: Vec<u8> = Vec::new();
            t.assert_equal(empty[3], 0);
            Ok(())
        })?
        .test("survives", |t| {
            t.pass();
            Ok(())
        })?;

    let report = suite.run()?;
    let exploded = report.cases.get("explodes").ok_or("missing explodes")?;
    ensure(exploded.tally == Tally { pass: 0, fail: 1 }, "one synthetic failure")?;
    ensure(exploded.tests[0].kind.contains("index out of bounds"), "panic message is the label")?;
    let survived = report.cases.get("survives").ok_or("missing survives")?;
    ensure(survived.tally == Tally { pass: 1, fail: 0 }, "next case still runs")
}

#[test]
fn empty_error_message_uses_fail_label() -> TestResult {
    let mut suite = Suite::new("Quiet");
    suite.test("silent", |_t| Err(failure("")))?;
    let report = suite.run()?;
    let record = &report.cases.get("silent").ok_or("missing case")?.tests[0];
    ensure(record.kind == "Fail", "empty message falls back to Fail")
}

// ============================================================================
// SECTION: Hooks
// ============================================================================

#[test]
fn hooks_run_in_lifecycle_order() -> TestResult {
    let log: CallLog = Rc::default();
    let mut suite = Suite::new("Order");
    suite
        .before(logging(&log, "before"))?
        .before_each(logging(&log, "before_each"))?
        .after_each(logging(&log, "after_each"))?
        .after(logging(&log, "after"))?
        .test("first", logging(&log, "body"))?
        .test("second", logging(&log, "body"))?;

    suite.run()?;
    let expected = [
        "before:before",
        "before_each:first",
        "body:first",
        "after_each:first",
        "before_each:second",
        "body:second",
        "after_each:second",
        "after:after",
    ];
    let calls = log.borrow().clone();
    ensure(calls == expected, format!("calls {calls:?}"))
}

#[test]
fn after_each_is_skipped_when_body_fails() -> TestResult {
    let log: CallLog = Rc::default();
    let mut suite = Suite::new("Skip");
    suite.after_each(logging(&log, "after_each"))?.after(logging(&log, "after"))?;
    suite.test("broken", |_t| Err(failure("boom")))?;
    suite.test("fine", logging(&log, "body"))?;

    suite.run()?;
    let calls = log.borrow().clone();
    ensure(
        calls == ["body:fine", "after_each:fine", "after:after"],
        format!("calls {calls:?}"),
    )
}

#[test]
fn before_failure_aborts_without_after() -> TestResult {
    let log: CallLog = Rc::default();
    let sink = Arc::new(InMemoryRunEventSink::new());
    let mut suite = Suite::new("Fatal").with_event_sink(sink.clone());
    suite.before(|_t| Err(failure("no fixtures")))?;
    suite.after(logging(&log, "after"))?;
    suite.test("never", logging(&log, "body"))?;

    let error = suite.run().err().ok_or("run should fail")?;
    ensure(
        error
            == SuiteError::SetupHook {
                hook: HookKind::Before,
                message: "no fixtures".to_string(),
            },
        format!("error {error}"),
    )?;
    ensure(log.borrow().is_empty(), "no case or after hook ran")?;
    ensure(suite.state() == SuiteState::Done, "aborted suite is done")?;
    ensure(
        sink.event_names() == ["suite_started", "setup_hook_failed"],
        format!("events {:?}", sink.event_names()),
    )
}

#[test]
fn before_panic_is_fatal_and_leaves_suite_done() -> TestResult {
    let log: CallLog = Rc::default();
    let mut suite = Suite::new("Fatal");
    suite.before(|_t| panic!("no database"))?;
    suite.after(logging(&log, "after"))?;
    suite.test("never", logging(&log, "body"))?;

    let error = suite.run().err().ok_or("run should fail")?;
    ensure(
        error
            == SuiteError::SetupHook {
                hook: HookKind::Before,
                message: "no database".to_string(),
            },
        format!("error {error}"),
    )?;
    ensure(log.borrow().is_empty(), "no case or after hook ran")?;
    ensure(suite.state() == SuiteState::Done, "aborted suite is done")
}

#[test]
fn after_panic_is_fatal() -> TestResult {
    let mut suite = Suite::new("Teardown");
    suite.test("ok", |t| {
        t.pass();
        Ok(())
    })?;
    suite.after(|_t| panic!("cleanup exploded"))?;
    let error = suite.run().err().ok_or("run should fail")?;
    ensure(
        matches!(&error, SuiteError::SetupHook { hook: HookKind::After, message } if message == "cleanup exploded"),
        format!("error {error}"),
    )?;
    ensure(suite.state() == SuiteState::Done, "aborted suite is done")
}

#[test]
fn after_failure_is_fatal() -> TestResult {
    let mut suite = Suite::new("Teardown");
    suite.test("ok", |t| {
        t.pass();
        Ok(())
    })?;
    suite.after(|_t| Err(failure("cleanup failed")))?;
    let error = suite.run().err().ok_or("run should fail")?;
    ensure(matches!(error, SuiteError::SetupHook { hook: HookKind::After, .. }), "after hook error")
}

#[test]
fn after_runs_after_contained_failures() -> TestResult {
    let mut suite = Suite::new("Teardown");
    suite.test("broken", |_t| Err(failure("boom")))?;
    suite.after(|t| {
        t.check(true, "teardown ran");
        Ok(())
    })?;
    let report = suite.run()?;
    let after = report.cases.get("after").ok_or("missing after case")?;
    ensure(after.tests[0].kind == "teardown ran", "after hook records under after")?;
    let names: Vec<&str> = report.cases.keys().map(String::as_str).collect();
    ensure(names == ["broken", "after"], format!("cases {names:?}"))
}

#[test]
fn hook_assertions_are_recorded_under_hook_cases() -> TestResult {
    let mut suite = Suite::new("Hook Results");
    suite.before(|t| {
        t.assert_true(1);
        t.assert_equal("1", 1);
        t.fail();
        Ok(())
    })?;
    suite.test("body", |t| {
        t.pass();
        Ok(())
    })?;
    suite.after(|t| {
        t.assert_identical(1, 1.0);
        Ok(())
    })?;

    let report = suite.run()?;
    let names: Vec<&str> = report.cases.keys().map(String::as_str).collect();
    ensure(names == [BEFORE_CASE, "body", AFTER_CASE], format!("cases {names:?}"))?;

    let before = report.cases.get(BEFORE_CASE).ok_or("missing before case")?;
    ensure(before.tally == Tally { pass: 2, fail: 1 }, format!("before tally {:?}", before.tally))?;
    let kinds: Vec<&str> = before.tests.iter().map(|record| record.kind.as_str()).collect();
    ensure(kinds == ["True", "Equal", "Fail"], format!("before kinds {kinds:?}"))?;

    let after = report.cases.get(AFTER_CASE).ok_or("missing after case")?;
    ensure(after.tally == Tally { pass: 0, fail: 1 }, format!("after tally {:?}", after.tally))?;
    ensure(after.tests[0].kind == "Identical", "after record label")?;
    ensure(report.totals == Tally { pass: 3, fail: 2 }, format!("totals {:?}", report.totals))
}

#[test]
fn before_each_resets_data_bag_fixtures() -> TestResult {
    let mut suite = Suite::new("Fixtures");
    suite.before_each(|t| {
        t.data_mut().insert("arr", values![1, 2, 3, 4, 5]);
        Ok(())
    })?;
    suite.test("pop", |t| {
        let popped = t.data_mut().get_mut("arr").and_then(|arr| arr.as_list_mut()).and_then(Vec::pop);
        t.assert_equal(popped, 5);
        t.assert_not_in_array(5, t.data().value("arr"));
        Ok(())
    })?;
    suite.test("fresh", |t| {
        t.assert_in_array(5, t.data().value("arr"));
        Ok(())
    })?;

    let report = suite.run()?;
    ensure(report.totals == Tally { pass: 3, fail: 0 }, format!("totals {:?}", report.totals))?;
    ensure(suite.data().value("arr") == values![1, 2, 3, 4, 5], "bag persists after run")
}

#[test]
fn data_bag_persists_between_cases_without_reset() -> TestResult {
    let mut suite = Suite::new("Counter");
    suite.data_mut().insert("count", 0);
    for name in ["one", "two", "three"] {
        suite.test(name, |t| {
            let next = match t.data().get("count") {
                Some(TestValue::Int(count)) => count + 1,
                _ => 0,
            };
            t.data_mut().insert("count", next);
            Ok(())
        })?;
    }
    suite.run()?;
    ensure(suite.data().value("count") == TestValue::Int(3), "three increments")
}

// ============================================================================
// SECTION: Registration
// ============================================================================

#[test]
fn duplicate_names_are_rejected() -> TestResult {
    let mut suite = Suite::new("Duplicates");
    suite.test("same", |_t| Ok(()))?;
    let error = suite.test("same", |_t| Ok(())).err().ok_or("duplicate accepted")?;
    ensure(
        error
            == RegistrationError::DuplicateCase {
                name: "same".to_string(),
            },
        format!("error {error}"),
    )?;
    ensure(suite.test("", |_t| Ok(())).err() == Some(RegistrationError::EmptyName), "empty name")?;
    ensure(suite.test_names() == ["same"], "only the first registration is kept")
}

#[test]
fn hook_case_names_are_reserved() -> TestResult {
    let mut suite = Suite::new("Reserved");
    suite.before(|t| {
        t.fail();
        Ok(())
    })?;
    for name in [BEFORE_CASE, AFTER_CASE] {
        let error = suite.test(name, |t| {
            t.pass();
            Ok(())
        });
        ensure(
            error.err()
                == Some(RegistrationError::ReservedName {
                    name: name.to_string(),
                }),
            format!("{name} must be rejected"),
        )?;
    }
    suite.test("Before", |t| {
        t.pass();
        Ok(())
    })?;

    let report = suite.run()?;
    let before = report.cases.get(BEFORE_CASE).ok_or("missing before case")?;
    ensure(before.tally == Tally { pass: 0, fail: 1 }, "hook results stay separate")?;
    ensure(before.tests.len() == 1, "no test records merged into the hook case")
}

#[test]
fn unnamed_tests_are_numbered() -> TestResult {
    let mut suite = Suite::new("Unnamed");
    suite.test("named", |_t| Ok(()))?;
    suite.test_unnamed(|_t| Ok(()))?.test_unnamed(|_t| Ok(()))?;
    ensure(
        suite.test_names() == ["named", "Test Case #2", "Test Case #3"],
        format!("names {:?}", suite.test_names()),
    )
}

#[test]
fn registration_and_rerun_fail_after_run() -> TestResult {
    let mut suite = Suite::new("Closed");
    ensure(!suite.has_hook(HookKind::BeforeEach), "no hook yet")?;
    suite.before_each(|_t| Ok(()))?;
    ensure(suite.has_hook(HookKind::BeforeEach), "hook stored")?;
    suite.run()?;

    let late = suite.test("late", |_t| Ok(())).err().ok_or("late test accepted")?;
    ensure(
        matches!(late, RegistrationError::NotBuilding { state: SuiteState::Done, .. }),
        format!("error {late}"),
    )?;
    ensure(suite.after(|_t| Ok(())).is_err(), "late hook rejected")?;
    let rerun = suite.run().err().ok_or("rerun accepted")?;
    ensure(
        rerun
            == SuiteError::AlreadyRun {
                state: SuiteState::Done,
            },
        format!("error {rerun}"),
    )
}

// ============================================================================
// SECTION: Events
// ============================================================================

#[test]
fn run_events_follow_the_lifecycle() -> TestResult {
    let sink = Arc::new(InMemoryRunEventSink::new());
    let mut suite = Suite::new("Events").with_event_sink(sink.clone());
    suite.test("good", |t| {
        t.pass();
        Ok(())
    })?;
    suite.test("bad", |_t| Err(failure("broken")))?;
    suite.run()?;

    ensure(
        sink.event_names()
            == [
                "suite_started",
                "case_started",
                "case_finished",
                "case_started",
                "case_error",
                "case_finished",
                "suite_finished",
            ],
        format!("events {:?}", sink.event_names()),
    )?;
    let events = sink.events();
    let error = events.iter().find(|event| event.event == "case_error").ok_or("no case_error")?;
    ensure(error.message.as_deref() == Some("broken"), "error message is logged")?;
    let finished = events.last().ok_or("no events")?;
    ensure(finished.pass == 1 && finished.fail == 1, "suite totals are logged")?;
    let payload = serde_json::to_value(finished)?;
    ensure(payload["event"] == "suite_finished", "events serialize as json")
}
