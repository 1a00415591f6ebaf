// crates/testify-core/src/runtime/report.rs
// ============================================================================
// Module: Testify Report Renderer
// Description: Terminal text and HTML renderings of a finished suite.
// Purpose: Format suite reports for people; never mutate results.
// Dependencies: crate::core::results, serde
// ============================================================================

//! ## Overview
//! Renderers are pure functions over a finished [`SuiteReport`]. Rendering
//! the same report twice yields byte-identical output.
//!
//! The text report lists every case with a PASS/FAIL banner, each assertion
//! label with its `file[line]: source` context, and the suite totals. ANSI
//! colour escapes are optional. The HTML report renders the
//! [`StructuredReport`] view as a standalone page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;

use crate::core::results::StructuredReport;
use crate::core::results::SuiteReport;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Output target of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Plain text for terminals.
    #[default]
    Text,
    /// Standalone HTML page.
    Html,
}

impl ReportFormat {
    /// Returns the stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Output target.
    pub format: ReportFormat,
    /// Emit ANSI colour escapes in text output.
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            color: true,
        }
    }
}

// ============================================================================
// SECTION: Colours
// ============================================================================

/// Terminal colours with fixed escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Code 30.
    Gray,
    /// Code 31.
    Red,
    /// Code 32.
    Green,
    /// Code 33.
    Yellow,
    /// Code 34.
    Blue,
    /// Code 35.
    Purple,
    /// Code 36.
    Cyan,
    /// Code 37.
    White,
    /// Code 38.
    Black,
}

impl Color {
    /// Returns the ANSI colour code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Gray => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Purple => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Black => 38,
        }
    }

    /// Returns the colour for a pass/fail verdict.
    #[must_use]
    pub const fn for_verdict(passed: bool) -> Self {
        if passed { Self::Green } else { Self::Red }
    }
}

/// Wraps `text` in an ANSI colour escape.
#[must_use]
pub fn colorize(text: &str, color: Color, bold: bool) -> String {
    format!("\x1b[{};{}m{text}\x1b[0m", u8::from(bold), color.code())
}

// ============================================================================
// SECTION: Renderers
// ============================================================================

/// Renders `report` in the configured format.
#[must_use]
pub fn render(report: &SuiteReport, options: &ReportOptions) -> String {
    match options.format {
        ReportFormat::Text => render_text(report, options.color),
        ReportFormat::Html => render_html(&report.structured()),
    }
}

/// Renders the terminal text report.
#[must_use]
pub fn render_text(report: &SuiteReport, color: bool) -> String {
    let paint = |text: &str, tint: Color, bold: bool| {
        if color { colorize(text, tint, bold) } else { text.to_string() }
    };
    let rule = "-".repeat(80);
    let mut out = String::new();

    for (name, case) in &report.cases {
        let passed = !case.tally.has_failures();
        let banner = if passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "{banner}: {}", paint(name, Color::for_verdict(passed), false));
        let _ = writeln!(out, "{rule}");
        for record in &case.tests {
            let _ = writeln!(out, "{}", paint(&record.kind, Color::for_verdict(record.outcome.is_pass()), false));
            let _ = writeln!(out, "{}[{}]: {}", record.source_file, record.source_line, record.source_text);
        }
        out.push_str("\n\n");
    }

    let _ = writeln!(out, "SUITE: {}", paint(&report.title, Color::Blue, true));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Tests Failed: {}", paint(&report.totals.fail.to_string(), Color::Red, false));
    let _ = writeln!(out, "Tests Passed: {}", paint(&report.totals.pass.to_string(), Color::Green, false));
    out.push('\n');
    out
}

/// Renders the structured view as a standalone HTML page.
#[must_use]
pub fn render_html(view: &StructuredReport<'_>) -> String {
    let title = escape_html(view.title);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(
        out,
        "<p class=\"totals\"><span class=\"fail\">Tests Failed: {}</span> <span class=\"pass\">Tests Passed: {}</span></p>",
        view.totals.fail, view.totals.pass
    );

    for (name, case) in view.cases {
        let verdict = if case.tally.has_failures() { "fail" } else { "pass" };
        let _ = writeln!(out, "<section class=\"case {verdict}\">");
        let _ = writeln!(
            out,
            "<h2>{} <small>({} passed, {} failed)</small></h2>",
            escape_html(name),
            case.tally.pass,
            case.tally.fail
        );
        out.push_str("<ol>\n");
        for record in &case.tests {
            let _ = writeln!(
                out,
                "<li class=\"{}\"><strong>{}</strong> <code>{}[{}]: {}</code></li>",
                record.outcome.as_str(),
                escape_html(&record.kind),
                escape_html(&record.source_file),
                record.source_line,
                escape_html(&record.source_text)
            );
        }
        out.push_str("</ol>\n</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Escapes text for HTML element and attribute content.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
