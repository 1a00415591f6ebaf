// crates/testify-core/src/core/data.rs
// ============================================================================
// Module: Testify Data Bag
// Description: Caller-populated key/value state shared within one run.
// Purpose: Let hooks and test bodies share fixtures explicitly.
// Dependencies: crate::core::value
// ============================================================================

//! ## Overview
//! The data bag is lent to every hook and test body of a run. The framework
//! never clears it; a `before_each` hook that rebuilds its fixtures is the
//! only reset mechanism.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::value::TestValue;

// ============================================================================
// SECTION: Data Bag
// ============================================================================

/// Mutable key/value store threaded through hooks and test bodies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataBag {
    /// Stored values keyed by name.
    entries: BTreeMap<String, TestValue>,
}

impl DataBag {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TestValue>) -> Option<TestValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TestValue> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut TestValue> {
        self.entries.get_mut(key)
    }

    /// Returns a clone of the value under `key`, or null when absent.
    #[must_use]
    pub fn value(&self, key: &str) -> TestValue {
        self.entries.get(key).cloned().unwrap_or(TestValue::Null)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<TestValue> {
        self.entries.remove(key)
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the bag holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
