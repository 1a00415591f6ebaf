// crates/testify-core/tests/report.rs
// ============================================================================
// Module: Report Renderer Tests
// Description: Exact text layout, colour escapes, and HTML escaping.
// Purpose: Ensure reports are deterministic renderings of finished results.
// ============================================================================
//! ## Overview
//! Integration tests for the text and HTML report renderers.

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

use indexmap::IndexMap;
use support::TestResult;
use support::ensure;
use testify_core::AssertionRecord;
use testify_core::CaseResult;
use testify_core::Color;
use testify_core::Outcome;
use testify_core::ReportFormat;
use testify_core::ReportOptions;
use testify_core::Suite;
use testify_core::SuiteReport;
use testify_core::Tally;
use testify_core::colorize;
use testify_core::render;
use testify_core::render_html;
use testify_core::render_text;

/// Builds a record at `demo.rs`.
fn record(kind: &str, outcome: Outcome, line: u32, text: &str) -> AssertionRecord {
    AssertionRecord {
        kind: kind.to_string(),
        outcome,
        source_file: "demo.rs".to_string(),
        source_line: line,
        source_text: text.to_string(),
    }
}

/// Builds a two-case report with one failure.
fn sample_report() -> SuiteReport {
    let mut cases = IndexMap::new();
    cases.insert(
        "good".to_string(),
        CaseResult {
            name: "good".to_string(),
            tally: Tally { pass: 1, fail: 0 },
            tests: vec![record("Equal", Outcome::Pass, 3, "t.assert_equal(1, \"1\");")],
        },
    );
    cases.insert(
        "bad".to_string(),
        CaseResult {
            name: "bad".to_string(),
            tally: Tally { pass: 0, fail: 1 },
            tests: vec![record("Fail", Outcome::Fail, 9, "t.fail();")],
        },
    );
    SuiteReport {
        title: "Demo <Suite>".to_string(),
        totals: Tally { pass: 1, fail: 1 },
        cases,
    }
}

// ============================================================================
// SECTION: Text
// ============================================================================

#[test]
fn plain_text_layout_is_exact() -> TestResult {
    let rule = "-".repeat(80);
    let expected = format!(
        "PASS: good\n{rule}\nEqual\ndemo.rs[3]: t.assert_equal(1, \"1\");\n\n\n\
         FAIL: bad\n{rule}\nFail\ndemo.rs[9]: t.fail();\n\n\n\
         SUITE: Demo <Suite>\n{rule}\nTests Failed: 1\nTests Passed: 1\n\n"
    );
    let text = render_text(&sample_report(), false);
    ensure(text == expected, format!("unexpected text:\n{text}"))
}

#[test]
fn colored_text_wraps_verdicts() -> TestResult {
    let text = render_text(&sample_report(), true);
    ensure(text.starts_with("PASS: \u{1b}[0;32mgood\u{1b}[0m\n"), "green pass banner")?;
    ensure(text.contains("FAIL: \u{1b}[0;31mbad\u{1b}[0m\n"), "red fail banner")?;
    ensure(text.contains("SUITE: \u{1b}[1;34mDemo <Suite>\u{1b}[0m\n"), "bold blue title")?;
    ensure(text.contains("Tests Failed: \u{1b}[0;31m1\u{1b}[0m\n"), "red failure count")?;
    ensure(text.ends_with("Tests Passed: \u{1b}[0;32m1\u{1b}[0m\n\n"), "green pass count")
}

#[test]
fn rendering_is_idempotent() -> TestResult {
    let report = sample_report();
    ensure(render_text(&report, true) == render_text(&report, true), "text is stable")?;
    ensure(render_html(&report.structured()) == render_html(&report.structured()), "html is stable")
}

#[test]
fn colour_codes_are_fixed() -> TestResult {
    let codes: Vec<u8> = [
        Color::Gray,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Cyan,
        Color::White,
        Color::Black,
    ]
    .iter()
    .map(|color| color.code())
    .collect();
    ensure(codes == (30 ..= 38).collect::<Vec<u8>>(), format!("codes {codes:?}"))?;
    ensure(colorize("x", Color::Cyan, true) == "\u{1b}[1;36mx\u{1b}[0m", "bold cyan escape")
}

#[test]
fn empty_suite_renders_totals_only() -> TestResult {
    let mut suite = Suite::new("Nothing");
    let report = suite.run()?;
    let rule = "-".repeat(80);
    let expected = format!("SUITE: Nothing\n{rule}\nTests Failed: 0\nTests Passed: 0\n\n");
    ensure(render_text(&report, false) == expected, "totals only")
}

// ============================================================================
// SECTION: HTML
// ============================================================================

#[test]
fn html_escapes_and_classifies() -> TestResult {
    let report = sample_report();
    let html = render_html(&report.structured());
    ensure(html.contains("<title>Demo &lt;Suite&gt;</title>"), "title escaped")?;
    ensure(html.contains("<section class=\"case pass\">"), "passing case class")?;
    ensure(html.contains("<section class=\"case fail\">"), "failing case class")?;
    ensure(html.contains("t.assert_equal(1, &quot;1&quot;);"), "source escaped")?;
    ensure(html.contains("<li class=\"fail\"><strong>Fail</strong>"), "record class")?;
    ensure(!html.contains("\u{1b}["), "no terminal escapes")
}

#[test]
fn render_dispatches_on_format() -> TestResult {
    let report = sample_report();
    let html = render(
        &report,
        &ReportOptions {
            format: ReportFormat::Html,
            color: true,
        },
    );
    ensure(html.starts_with("<!DOCTYPE html>"), "html format")?;
    let text = render(
        &report,
        &ReportOptions {
            format: ReportFormat::Text,
            color: false,
        },
    );
    ensure(text == render_text(&report, false), "text format")
}

#[test]
fn structured_view_serializes_case_tallies() -> TestResult {
    let report = sample_report();
    let value = serde_json::to_value(report.structured())?;
    ensure(value["title"] == "Demo <Suite>", "title")?;
    ensure(value["totals"]["fail"] == 1, "totals")?;
    ensure(value["cases"]["bad"]["fail"] == 1, "flattened case tally")?;
    ensure(value["cases"]["good"]["tests"][0]["outcome"] == "pass", "record outcome")
}
