// crates/testify-cli/src/lib.rs
// ============================================================================
// Module: Testify CLI Library
// Description: Shared helpers for the testify command-line interface.
// Purpose: Provide reusable components (messages, built-in suites) for the binary and tests.
// Dependencies: testify-core
// ============================================================================

//! ## Overview
//! This library houses the CLI messages and the built-in suites the `testify`
//! binary runs. The binary entry point (`src/main.rs`) imports these helpers
//! so every status and error line is defined in [`messages`].

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Typed user-facing messages.
pub mod messages;
/// Built-in suites runnable from the command line.
pub mod suites;
