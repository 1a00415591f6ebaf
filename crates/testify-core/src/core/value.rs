// crates/testify-core/src/core/value.rs
// ============================================================================
// Module: Testify Values
// Description: Heterogeneous value model compared by assertions.
// Purpose: Give assertions one typed value space with scalar and composite kinds.
// Dependencies: indexmap, serde, serde_json
// ============================================================================

//! ## Overview
//! [`TestValue`] is the value space every assertion compares. It keeps the
//! distinctions the comparison rules depend on: integers and floats are
//! separate kinds, keyed maps preserve insertion order, and composite objects
//! carry a class name next to their named fields.
//!
//! Lists and maps are both "arrays" for comparison purposes. A list entry's
//! key is its zero-based index rendered as a decimal string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A value passed to an assertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// UTF-8 string value.
    Str(String),
    /// Ordered sequence indexed from zero.
    List(Vec<TestValue>),
    /// Insertion-ordered map keyed by strings.
    Map(IndexMap<String, TestValue>),
    /// Composite object with a class name and named fields.
    Object(ObjectValue),
}

/// Composite object payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectValue {
    /// Class (type) name of the object.
    pub class: String,
    /// Named fields in declaration order.
    pub fields: IndexMap<String, TestValue>,
}

impl TestValue {
    /// Builds a list from any iterator of convertible items.
    #[must_use]
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a keyed map; later duplicates replace earlier values in place.
    #[must_use]
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }

    /// Builds a composite object of `class` with the given fields.
    #[must_use]
    pub fn object<I, K, V>(class: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Object(ObjectValue {
            class: class.into(),
            fields: fields.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        })
    }

    /// Builds a field-less composite object of `class`.
    #[must_use]
    pub fn empty_object(class: impl Into<String>) -> Self {
        Self::Object(ObjectValue {
            class: class.into(),
            fields: IndexMap::new(),
        })
    }

    /// Returns a short label for the value kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }

    /// Returns true for list and map values.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Returns the mutable list payload when the value is a list.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the keyed entries of a list or map in order.
    ///
    /// List indices become decimal keys so lists and maps compare uniformly.
    #[must_use]
    pub fn array_entries(&self) -> Option<Vec<(Cow<'_, str>, &Self)>> {
        match self {
            Self::List(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (Cow::Owned(index.to_string()), item))
                    .collect(),
            ),
            Self::Map(entries) => Some(
                entries.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), value)).collect(),
            ),
            _ => None,
        }
    }

    /// Returns the element values of a list or map in order.
    #[must_use]
    pub fn array_values(&self) -> Option<Vec<&Self>> {
        match self {
            Self::List(items) => Some(items.iter().collect()),
            Self::Map(entries) => Some(entries.values().collect()),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<bool> for TestValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TestValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TestValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i16> for TestValue {
    fn from(value: i16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i8> for TestValue {
    fn from(value: i8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for TestValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u16> for TestValue {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for TestValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for TestValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for TestValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for TestValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TestValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<()> for TestValue {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<TestValue>> From<Option<T>> for TestValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<TestValue>> From<Vec<T>> for TestValue {
    fn from(value: Vec<T>) -> Self {
        Self::list(value)
    }
}

impl<T: Into<TestValue>, const N: usize> From<[T; N]> for TestValue {
    fn from(value: [T; N]) -> Self {
        Self::list(value)
    }
}

impl From<&TestValue> for TestValue {
    fn from(value: &TestValue) -> Self {
        value.clone()
    }
}

impl From<serde_json::Value> for TestValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || number.as_f64().map_or(Self::Null, Self::Float),
                Self::Int,
            ),
            serde_json::Value::String(text) => Self::Str(text),
            serde_json::Value::Array(items) => Self::list(items),
            serde_json::Value::Object(entries) => Self::map(entries),
        }
    }
}
