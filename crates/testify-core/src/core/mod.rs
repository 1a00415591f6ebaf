// crates/testify-core/src/core/mod.rs
// ============================================================================
// Module: Testify Core Types
// Description: Values, call sites, results, and the shared data bag.
// Purpose: Provide the plain data types shared by the runtime and renderers.
// Dependencies: indexmap, serde
// ============================================================================

//! ## Overview
//! Core types carry no behavior beyond construction and counting. Comparison,
//! recording, and rendering live in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod data;
pub mod location;
pub mod results;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use data::DataBag;
pub use location::CallSite;
pub use location::SourceLocation;
pub use results::AssertionRecord;
pub use results::CaseResult;
pub use results::Outcome;
pub use results::StructuredReport;
pub use results::SuiteReport;
pub use results::Tally;
pub use value::ObjectValue;
pub use value::TestValue;
