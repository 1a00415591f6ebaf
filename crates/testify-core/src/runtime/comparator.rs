// crates/testify-core/src/runtime/comparator.rs
// ============================================================================
// Module: Testify Value Comparator
// Description: Loose equality, strict identity, and membership semantics.
// Purpose: Turn pairs of assertion values into boolean verdicts.
// Dependencies: crate::core::value
// ============================================================================

//! ## Overview
//! Three comparison semantics back the assertion API:
//!
//! - [`loose_equal`]: coercive cross-kind equality over one frozen table.
//! - [`identical`]: same kind and structurally identical value. Composite
//!   objects compare by class and fields, never by reference.
//! - [`is_member`]: any element of a list or map is loosely equal.
//!
//! All functions are total. Pairs with no defined relation compare unequal.
//!
//! ## Loose equality table
//! - `bool` against anything compares with the other side's truthiness.
//! - `null` equals `null`, equals a string only when it is empty, and equals
//!   any other value only when that value is falsy.
//! - Numbers compare numerically; integers meet floats as `f64`.
//! - A number against a numeric string compares numerically; against any
//!   other string it compares as text, so `0 == ""` is false.
//! - Two strings compare numerically when both are numeric, else bytewise.
//! - Lists and maps need the same key set with loosely equal values; entry
//!   order is ignored. A list element's key is its index.
//! - Objects need the same class and loosely equal fields.
//! - Every other pairing is unequal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::value::ObjectValue;
use crate::core::value::TestValue;

// ============================================================================
// SECTION: Public Comparisons
// ============================================================================

/// Returns the truthiness of a value.
///
/// Falsy values: `null`, `false`, `0`, `0.0`, `""`, `"0"`, empty lists and
/// empty maps. Objects are always truthy.
#[must_use]
#[allow(clippy::float_cmp, reason = "Zero test follows exact float semantics.")]
pub fn truthy(value: &TestValue) -> bool {
    match value {
        TestValue::Null => false,
        TestValue::Bool(flag) => *flag,
        TestValue::Int(number) => *number != 0,
        TestValue::Float(number) => *number != 0.0,
        TestValue::Str(text) => !(text.is_empty() || text == "0"),
        TestValue::List(items) => !items.is_empty(),
        TestValue::Map(entries) => !entries.is_empty(),
        TestValue::Object(_) => true,
    }
}

/// Coercive equality over the frozen loose-equality table.
#[must_use]
pub fn loose_equal(left: &TestValue, right: &TestValue) -> bool {
    match (left, right) {
        (TestValue::Bool(flag), other) | (other, TestValue::Bool(flag)) => *flag == truthy(other),
        (TestValue::Null, TestValue::Null) => true,
        (TestValue::Null, TestValue::Str(text)) | (TestValue::Str(text), TestValue::Null) => {
            text.is_empty()
        }
        (TestValue::Null, other) | (other, TestValue::Null) => !truthy(other),
        (TestValue::Str(left_text), TestValue::Str(right_text)) => {
            strings_loosely_equal(left_text, right_text)
        }
        (TestValue::Str(text), other) | (other, TestValue::Str(text)) => {
            number_of(other).is_some_and(|number| number_matches_string(number, text))
        }
        (TestValue::Object(left_object), TestValue::Object(right_object)) => {
            objects_loosely_equal(left_object, right_object)
        }
        _ => match (number_of(left), number_of(right)) {
            (Some(left_number), Some(right_number)) => left_number.equals(right_number),
            _ => arrays_loosely_equal(left, right),
        },
    }
}

/// Strict equality: same kind and identical value, recursively.
///
/// Integers never match floats. Lists and maps must agree on entry order.
/// Objects match on class and field values regardless of field order.
#[must_use]
#[allow(clippy::float_cmp, reason = "Identity of floats is exact equality.")]
pub fn identical(left: &TestValue, right: &TestValue) -> bool {
    match (left, right) {
        (TestValue::Null, TestValue::Null) => true,
        (TestValue::Bool(left_flag), TestValue::Bool(right_flag)) => left_flag == right_flag,
        (TestValue::Int(left_number), TestValue::Int(right_number)) => left_number == right_number,
        (TestValue::Float(left_number), TestValue::Float(right_number)) => {
            left_number == right_number
        }
        (TestValue::Str(left_text), TestValue::Str(right_text)) => left_text == right_text,
        (TestValue::Object(left_object), TestValue::Object(right_object)) => {
            left_object.class == right_object.class
                && left_object.fields.len() == right_object.fields.len()
                && left_object.fields.iter().all(|(name, value)| {
                    right_object.fields.get(name).is_some_and(|other| identical(value, other))
                })
        }
        _ => arrays_identical(left, right),
    }
}

/// Returns true when any element of `collection` loosely equals `value`.
///
/// Non-array collections contain nothing.
#[must_use]
pub fn is_member(value: &TestValue, collection: &TestValue) -> bool {
    collection
        .array_values()
        .is_some_and(|items| items.into_iter().any(|item| loose_equal(value, item)))
}

// ============================================================================
// SECTION: Numeric Coercion
// ============================================================================

/// Numeric view of an integer, float, or numeric string.
#[derive(Debug, Clone, Copy)]
enum Numeric {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Numeric {
    /// Widens the number to `f64`.
    #[allow(clippy::cast_precision_loss, reason = "Mixed comparisons use float semantics.")]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(number) => number as f64,
            Self::Float(number) => number,
        }
    }

    /// Numeric equality; integer pairs compare exactly.
    #[allow(clippy::float_cmp, reason = "Loose numeric equality is exact float equality.")]
    fn equals(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            (left, right) => left.as_f64() == right.as_f64(),
        }
    }

    /// Text form used when a number meets a non-numeric string.
    fn text(self) -> String {
        match self {
            Self::Int(number) => number.to_string(),
            Self::Float(number) if number.is_nan() => "NAN".to_string(),
            Self::Float(number) if number.is_infinite() => {
                if number.is_sign_negative() { "-INF".to_string() } else { "INF".to_string() }
            }
            Self::Float(number) => number.to_string(),
        }
    }
}

/// Returns the numeric view of integer and float values.
const fn number_of(value: &TestValue) -> Option<Numeric> {
    match value {
        TestValue::Int(number) => Some(Numeric::Int(*number)),
        TestValue::Float(number) => Some(Numeric::Float(*number)),
        _ => None,
    }
}

/// Compares a number against a string.
///
/// Finite numbers render as numeric text, so only the non-finite spellings
/// can match a non-numeric string.
fn number_matches_string(number: Numeric, text: &str) -> bool {
    parse_numeric(text).map_or_else(|| number.text() == text, |parsed| number.equals(parsed))
}

/// Compares two strings, numerically when both are numeric.
fn strings_loosely_equal(left: &str, right: &str) -> bool {
    match (parse_numeric(left), parse_numeric(right)) {
        (Some(left_number), Some(right_number)) => left_number.equals(right_number),
        _ => left == right,
    }
}

/// Parses a numeric string.
///
/// Accepted form: optional surrounding whitespace, optional sign, decimal
/// digits with an optional fraction, and an optional exponent. Hex, `inf`,
/// and `nan` spellings are not numeric.
fn parse_numeric(text: &str) -> Option<Numeric> {
    let trimmed =
        text.trim_matches(|ch: char| matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    let bytes = trimmed.as_bytes();
    let mut index = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }
    let integer_start = index;
    index = skip_digits(bytes, index);
    let integer_digits = index - integer_start;
    let mut fraction_digits = 0;
    let mut is_float = false;
    if bytes.get(index) == Some(&b'.') {
        is_float = true;
        let fraction_start = index + 1;
        index = skip_digits(bytes, fraction_start);
        fraction_digits = index - fraction_start;
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }
    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        let mut exponent = index + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = skip_digits(bytes, exponent);
        if exponent_end == exponent {
            return None;
        }
        is_float = true;
        index = exponent_end;
    }
    if index != bytes.len() {
        return None;
    }
    if !is_float && let Ok(number) = trimmed.parse::<i64>() {
        return Some(Numeric::Int(number));
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

/// Returns the index of the first non-digit byte at or after `start`.
fn skip_digits(bytes: &[u8], start: usize) -> usize {
    let mut index = start;
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    index
}

// ============================================================================
// SECTION: Composite Comparison
// ============================================================================

/// Loose equality for lists and maps: same keys, loosely equal values.
fn arrays_loosely_equal(left: &TestValue, right: &TestValue) -> bool {
    let (Some(left_entries), Some(right_entries)) = (left.array_entries(), right.array_entries())
    else {
        return false;
    };
    if left_entries.len() != right_entries.len() {
        return false;
    }
    left_entries.iter().all(|(key, value)| {
        right_entries
            .iter()
            .find(|(other_key, _)| other_key == key)
            .is_some_and(|(_, other)| loose_equal(value, other))
    })
}

/// Strict equality for lists and maps: same keys in order, identical values.
fn arrays_identical(left: &TestValue, right: &TestValue) -> bool {
    let (Some(left_entries), Some(right_entries)) = (left.array_entries(), right.array_entries())
    else {
        return false;
    };
    left_entries.len() == right_entries.len()
        && left_entries.iter().zip(&right_entries).all(
            |((left_key, left_value), (right_key, right_value))| {
                left_key == right_key && identical(left_value, right_value)
            },
        )
}

/// Loose equality for objects: same class and loosely equal fields.
fn objects_loosely_equal(left: &ObjectValue, right: &ObjectValue) -> bool {
    left.class == right.class
        && left.fields.len() == right.fields.len()
        && left
            .fields
            .iter()
            .all(|(name, value)| right.fields.get(name).is_some_and(|other| loose_equal(value, other)))
}
