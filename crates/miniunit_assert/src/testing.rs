//! The assertion primitives.
//!
//! These are intended to be used from test bodies via:
//! - `use miniunit::prelude::*;` then `are_equal(2, counter)?;`

use std::cmp::Ordering;
use std::fmt::Debug;

use miniunit_core::{Failure, ValueSnapshot};

use crate::condition::Condition;

/// Ordering-based equality: two values are equal when they compare as `Equal`.
///
/// Values without an ordering between them (e.g. `NaN`) are never equal.
fn compare_equal<T: PartialOrd + ?Sized>(left: &T, right: &T) -> bool {
    left.partial_cmp(right) == Some(Ordering::Equal)
}

/// Assert that two values are equal.
///
/// Use `Option<T>` to compare values that may be absent; two `None`s are equal.
///
/// # Errors
///
/// Returns [`Failure::EqualityMismatch`] if `expected` and `actual` do not compare equal.
pub fn are_equal<T: PartialOrd + Debug>(expected: T, actual: T) -> Result<(), Failure> {
    if compare_equal(&expected, &actual) {
        return Ok(());
    }
    Err(Failure::EqualityMismatch {
        expected: ValueSnapshot::debug(&expected),
        actual: ValueSnapshot::debug(&actual),
    })
}

/// Assert that two values are not equal, using the same rule as [`are_equal`].
///
/// # Errors
///
/// Returns [`Failure::InequalityViolation`] if `not_expected` and `actual` compare equal (including two `None`s).
pub fn are_not_equal<T: PartialOrd + Debug>(not_expected: T, actual: T) -> Result<(), Failure> {
    if !compare_equal(&not_expected, &actual) {
        return Ok(());
    }
    Err(Failure::InequalityViolation {
        not_expected: ValueSnapshot::debug(&not_expected),
        actual: ValueSnapshot::debug(&actual),
    })
}

/// String flavour of [`are_equal`]. Same semantics; the failure also carries the UTF-8 bytes of both sides.
///
/// # Errors
///
/// Returns [`Failure::EqualityMismatch`] if the strings differ.
pub fn are_equal_str<'a, 'b>(
    expected: impl Into<Option<&'a str>>,
    actual: impl Into<Option<&'b str>>,
) -> Result<(), Failure> {
    let (expected, actual) = (expected.into(), actual.into());
    if compare_equal(&expected, &actual) {
        return Ok(());
    }
    Err(Failure::EqualityMismatch {
        expected: ValueSnapshot::text(expected),
        actual: ValueSnapshot::text(actual),
    })
}

/// String flavour of [`are_not_equal`].
///
/// # Errors
///
/// Returns [`Failure::InequalityViolation`] if the strings are equal, or both absent.
pub fn are_not_equal_str<'a, 'b>(
    not_expected: impl Into<Option<&'a str>>,
    actual: impl Into<Option<&'b str>>,
) -> Result<(), Failure> {
    let (not_expected, actual) = (not_expected.into(), actual.into());
    if !compare_equal(&not_expected, &actual) {
        return Ok(());
    }
    Err(Failure::InequalityViolation {
        not_expected: ValueSnapshot::text(not_expected),
        actual: ValueSnapshot::text(actual),
    })
}

/// Assert that a condition (value or predicate) is true.
///
/// # Errors
///
/// Returns [`Failure::BooleanAssertionFailed`] if the condition evaluates to false.
pub fn is_true(condition: impl Condition) -> Result<(), Failure> {
    if condition.evaluate() {
        Ok(())
    } else {
        Err(Failure::BooleanAssertionFailed { expected_true: true })
    }
}

/// Assert that a condition (value or predicate) is false.
///
/// # Errors
///
/// Returns [`Failure::BooleanAssertionFailed`] if the condition evaluates to true.
pub fn is_false(condition: impl Condition) -> Result<(), Failure> {
    if condition.evaluate() {
        Err(Failure::BooleanAssertionFailed { expected_true: false })
    } else {
        Ok(())
    }
}

/// Explicitly fail a test with a reason.
///
/// # Errors
///
/// Always returns [`Failure::ExplicitFailure`].
pub fn fail(reason: impl Into<String>) -> Result<(), Failure> {
    Err(Failure::explicit(reason))
}
