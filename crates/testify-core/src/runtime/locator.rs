// crates/testify-core/src/runtime/locator.rs
// ============================================================================
// Module: Testify Source Locator
// Description: Resolves call sites to file names, lines, and source text.
// Purpose: Attach the user's source line to every recorded assertion.
// Dependencies: crate::core::location, thiserror
// ============================================================================

//! ## Overview
//! The locator maps a [`CallSite`] to the trimmed text of its source line.
//! Source files are read at most once per run through a [`FileLineCache`];
//! unreadable files are cached as unavailable as well. Files are assumed to be
//! immutable for the duration of a run.
//!
//! Call sites that point into this crate's own recording modules are replaced
//! by the fallback site (the `Suite::run` call site), so a failure synthesized
//! by the runner is attributed to user code.
//!
//! Compiler-reported paths are usually relative to the workspace root. They
//! are resolved against every configured root and each of its ancestors; the
//! first existing file wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::location::CallSite;
use crate::core::location::SourceLocation;
use crate::runtime::recorder;
use crate::runtime::runner;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum size of a source file read for call-site text.
pub const DEFAULT_MAX_SOURCE_BYTES: u64 = 4 * 1024 * 1024;

/// Source files owned by the framework's recording path.
const FRAMEWORK_FILES: [&str; 2] = [runner::MODULE_FILE, recorder::MODULE_FILE];

// ============================================================================
// SECTION: Options
// ============================================================================

/// Source resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Directories used to resolve relative call-site paths. The working
    /// directory is always tried last.
    pub roots: Vec<PathBuf>,
    /// Files larger than this are treated as unavailable.
    pub max_file_bytes: u64,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            max_file_bytes: DEFAULT_MAX_SOURCE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Source text could not be produced for a call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    /// The file could not be found or read as UTF-8.
    #[error("source file unavailable: {file}")]
    Unreadable {
        /// Call-site path.
        file: String,
    },
    /// The file exceeds the configured size limit.
    #[error("source file {file} exceeds {limit} bytes")]
    TooLarge {
        /// Call-site path.
        file: String,
        /// Configured limit in bytes.
        limit: u64,
    },
    /// The file has fewer lines than the call site claims.
    #[error("line {line} out of range for {file} ({available} lines)")]
    LineOutOfRange {
        /// Call-site path.
        file: String,
        /// Requested one-based line.
        line: u32,
        /// Number of lines in the file.
        available: usize,
    },
}

// ============================================================================
// SECTION: File Line Cache
// ============================================================================

/// Per-run cache of source files split into lines.
#[derive(Debug, Default)]
pub struct FileLineCache {
    /// Loaded lines (or the load failure) keyed by call-site path.
    files: HashMap<&'static str, Result<Vec<String>, LocatorError>>,
}

impl FileLineCache {
    /// Returns the lines of `file`, loading it on first access.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when the file is missing, unreadable, or too
    /// large. The failure is cached.
    pub fn lines(
        &mut self,
        file: &'static str,
        options: &SourceOptions,
    ) -> Result<&[String], LocatorError> {
        self.files
            .entry(file)
            .or_insert_with(|| load_lines(file, options))
            .as_deref()
            .map_err(Clone::clone)
    }

    /// Returns the number of cached files, including failed loads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true when nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// ============================================================================
// SECTION: Source Locator
// ============================================================================

/// Resolves call sites into source text through a per-run cache.
#[derive(Debug, Default)]
pub struct SourceLocator {
    /// Resolution settings.
    options: SourceOptions,
    /// Lines of files read so far.
    cache: FileLineCache,
}

impl SourceLocator {
    /// Creates a locator with an empty cache.
    #[must_use]
    pub fn new(options: SourceOptions) -> Self {
        Self {
            options,
            cache: FileLineCache::default(),
        }
    }

    /// Returns the call site to report for `site`.
    ///
    /// Sites inside the framework's recording modules are replaced by
    /// `fallback` when one is available.
    #[must_use]
    pub fn resolve_site(site: CallSite, fallback: Option<CallSite>) -> CallSite {
        match fallback {
            Some(fallback) if is_framework_file(site.file) => fallback,
            _ => site,
        }
    }

    /// Resolves `site` into the location stored on a record.
    ///
    /// Unavailable source text is substituted with an empty string.
    pub fn locate(&mut self, site: CallSite, fallback: Option<CallSite>) -> SourceLocation {
        let site = Self::resolve_site(site, fallback);
        SourceLocation {
            file: site.file_name(),
            line: site.line,
            source_text: self.source_text(site).unwrap_or_default(),
        }
    }

    /// Returns the trimmed source text of the call-site line.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when the file is unavailable or shorter than
    /// the requested line.
    pub fn source_text(&mut self, site: CallSite) -> Result<String, LocatorError> {
        let lines = self.cache.lines(site.file, &self.options)?;
        let index = usize::try_from(site.line).ok().and_then(|line| line.checked_sub(1));
        index
            .and_then(|index| lines.get(index))
            .map(|line| line.trim().to_string())
            .ok_or_else(|| LocatorError::LineOutOfRange {
                file: site.file.to_string(),
                line: site.line,
                available: lines.len(),
            })
    }

    /// Returns the cache backing this locator.
    #[must_use]
    pub const fn cache(&self) -> &FileLineCache {
        &self.cache
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when `file` is one of the framework's recording modules.
pub(super) fn is_framework_file(file: &str) -> bool {
    FRAMEWORK_FILES.contains(&file)
}

/// Loads `file` and splits it into lines.
fn load_lines(file: &str, options: &SourceOptions) -> Result<Vec<String>, LocatorError> {
    let unreadable = || LocatorError::Unreadable {
        file: file.to_string(),
    };
    let path = resolve_path(file, &options.roots).ok_or_else(unreadable)?;
    let size = fs::metadata(&path).map_err(|_| unreadable())?.len();
    if size > options.max_file_bytes {
        return Err(LocatorError::TooLarge {
            file: file.to_string(),
            limit: options.max_file_bytes,
        });
    }
    let content = fs::read_to_string(&path).map_err(|_| unreadable())?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Finds the file a call-site path refers to.
pub(super) fn resolve_path(file: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    let path = Path::new(file);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    roots
        .iter()
        .cloned()
        .chain(env::current_dir().ok())
        .find_map(|root| {
            root.ancestors().map(|base| base.join(path)).find(|candidate| candidate.is_file())
        })
}
