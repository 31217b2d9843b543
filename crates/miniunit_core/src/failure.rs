//! The closed failure taxonomy produced by assertion primitives and by the runner's reconciliation step.

use std::fmt::{self, Debug};

use serde::Serialize;
use thiserror::Error;

use crate::kind::ErrorKind;

const NULL_REPR: &str = "null";

/// Rendered diagnostic view of a value taking part in a failed assertion.
///
/// `utf8_bytes` is only filled in by the string assertions; it exposes the exact encoding of both sides, which is
/// what you need when two strings print the same but do not compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSnapshot {
    pub repr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utf8_bytes: Option<Vec<u8>>,
}

impl ValueSnapshot {
    /// Snapshot a value through its `Debug` rendering.
    pub fn debug<T: Debug + ?Sized>(value: &T) -> Self {
        Self {
            repr: format!("{value:?}"),
            utf8_bytes: None,
        }
    }

    /// Snapshot an optional string, keeping its UTF-8 bytes. `None` renders as `null`.
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => Self {
                repr: format!("{s:?}"),
                utf8_bytes: Some(s.as_bytes().to_vec()),
            },
            None => Self::null(),
        }
    }

    pub fn null() -> Self {
        Self {
            repr: NULL_REPR.to_string(),
            utf8_bytes: None,
        }
    }

    pub fn is_null(&self) -> bool {
        self.repr == NULL_REPR && self.utf8_bytes.is_none()
    }
}

impl fmt::Display for ValueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)?;
        if let Some(bytes) = &self.utf8_bytes {
            write!(f, " (bytes: {bytes:?})")?;
        }
        Ok(())
    }
}

/// A failed expectation inside a test.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum Failure {
    #[error("Assert.AreEqual failed: expected {expected}, actual {actual}")]
    EqualityMismatch {
        expected: ValueSnapshot,
        actual: ValueSnapshot,
    },

    #[error("Assert.AreNotEqual failed: did not expect {not_expected}, actual {actual}")]
    InequalityViolation {
        not_expected: ValueSnapshot,
        actual: ValueSnapshot,
    },

    #[error("Assert.{} failed", boolean_assertion_name(.expected_true))]
    BooleanAssertionFailed { expected_true: bool },

    #[error("Assert.Fail: [{reason}]")]
    ExplicitFailure { reason: String },

    #[error("expected error of kind {expected_kind}, but {}", DescribeThrown(.thrown_kind))]
    ExpectedErrorMismatch {
        expected_kind: ErrorKind,
        thrown_kind: Option<ErrorKind>,
    },
}

fn boolean_assertion_name(expected_true: &bool) -> &'static str {
    if *expected_true { "IsTrue" } else { "IsFalse" }
}

struct DescribeThrown<'a>(&'a Option<ErrorKind>);

impl fmt::Display for DescribeThrown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(kind) => write!(f, "{kind} was raised"),
            None => f.write_str("nothing was raised"),
        }
    }
}

impl Failure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Failure::EqualityMismatch { .. } => ErrorKind::EqualityMismatch,
            Failure::InequalityViolation { .. } => ErrorKind::InequalityViolation,
            Failure::BooleanAssertionFailed { .. } => ErrorKind::BooleanAssertionFailed,
            Failure::ExplicitFailure { .. } => ErrorKind::ExplicitFailure,
            Failure::ExpectedErrorMismatch { .. } => ErrorKind::ExpectedErrorMismatch,
        }
    }

    pub fn explicit(reason: impl Into<String>) -> Self {
        Failure::ExplicitFailure { reason: reason.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn text_snapshot_keeps_bytes() {
        let snap = ValueSnapshot::text(Some("é"));
        assert_eq!(snap.utf8_bytes.as_deref(), Some(&[0xc3, 0xa9][..]));
        assert_eq!(snap.to_string(), "\"é\" (bytes: [195, 169])");
    }

    #[test]
    fn absent_text_is_null() {
        let snap = ValueSnapshot::text(None);
        assert!(snap.is_null());
        assert_eq!(snap.to_string(), "null");
    }

    #[test]
    fn explicit_failure_message() {
        assert_eq!(Failure::explicit("boom").to_string(), "Assert.Fail: [boom]");
    }

    #[test]
    fn boolean_failure_message() {
        let f = Failure::BooleanAssertionFailed { expected_true: false };
        assert_eq!(f.to_string(), "Assert.IsFalse failed");
        assert_eq!(f.kind(), ErrorKind::BooleanAssertionFailed);
    }

    #[test]
    fn mismatch_message_without_thrown_kind() {
        let f = Failure::ExpectedErrorMismatch {
            expected_kind: ErrorKind::Panic,
            thrown_kind: None,
        };
        assert_eq!(f.to_string(), "expected error of kind Panic, but nothing was raised");
    }

    #[test]
    fn failure_serializes_with_kind_tag() {
        let f = Failure::explicit("x");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "ExplicitFailure");
        assert_eq!(json["reason"], "x");
    }
}
