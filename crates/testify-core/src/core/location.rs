// crates/testify-core/src/core/location.rs
// ============================================================================
// Module: Testify Call Sites
// Description: Source-location tokens captured at assertion call sites.
// Purpose: Carry file/line information from callers into the recorder.
// Dependencies: std::panic::Location
// ============================================================================

//! ## Overview
//! A [`CallSite`] is captured with `#[track_caller]` at every public
//! assertion entry point, so the location always names the caller's line and
//! never a line inside this crate. Callers that record through their own
//! wrappers can build one explicitly with [`CallSite::new`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::panic::Location;
use std::path::Path;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Unresolved call-site token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// File path as reported by the compiler.
    pub file: &'static str,
    /// One-based line number.
    pub line: u32,
}

impl CallSite {
    /// Creates a call site from an explicit file and line.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file,
            line,
        }
    }

    /// Captures the location of the caller of the enclosing
    /// `#[track_caller]` function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Returns the base file name of the call site.
    #[must_use]
    pub fn file_name(&self) -> String {
        Path::new(self.file)
            .file_name()
            .map_or_else(|| self.file.to_string(), |name| name.to_string_lossy().into_owned())
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// Resolved call-site metadata stored on each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Base file name.
    pub file: String,
    /// One-based line number.
    pub line: u32,
    /// Trimmed source text of the line; empty when unavailable.
    pub source_text: String,
}
