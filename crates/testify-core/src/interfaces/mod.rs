// crates/testify-core/src/interfaces/mod.rs
// ============================================================================
// Module: Testify Interfaces
// Description: Integration seams for run observability.
// Purpose: Define the contract surfaces the runner reports through.
// Dependencies: crate::runtime::events
// ============================================================================

//! ## Overview
//! The runner emits structured [`RunEvent`]s through a [`RunEventSink`].
//! Sinks never influence results; a sink that cannot write drops the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::runtime::events::RunEvent;

// ============================================================================
// SECTION: Run Event Sink
// ============================================================================

/// Destination for structured run events.
pub trait RunEventSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &RunEvent);
}
