// crates/testify-config/src/lib.rs
// ============================================================================
// Module: Testify Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for testify.toml semantics.
// Dependencies: testify-core, serde, toml
// ============================================================================

//! ## Overview
//! `testify-config` defines the configuration model for testify runs: report
//! format and colour, call-site source resolution, and run event logging.
//! Validation is strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
