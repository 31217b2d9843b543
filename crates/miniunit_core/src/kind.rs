//! Error kind tags used to reconcile a raised error against a declared expectation.
//!
//! A test may declare that it expects a specific kind of error. Matching is exact: a kind only matches itself,
//! never a "parent" kind. The assertion failures are their own closed set of kinds; every other error type is
//! identified by its Rust type through [`TypeTag`].

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Identity of a Rust type, compared by [`TypeId`] and carrying the type name for display.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for the type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type path as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The kind of an error raised by a test body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `are_equal` saw two different values.
    EqualityMismatch,
    /// `are_not_equal` saw two equal values.
    InequalityViolation,
    /// `is_true` / `is_false` saw the wrong boolean.
    BooleanAssertionFailed,
    /// `fail` was called.
    ExplicitFailure,
    /// The runner replaced a raised error (or its absence) because it did not match the declared kind.
    ExpectedErrorMismatch,
    /// The test body panicked.
    Panic,
    /// Any other error type, identified by its Rust type.
    Custom(TypeTag),
}

impl ErrorKind {
    /// Kind for errors of the Rust type `E`.
    ///
    /// Note that `ErrorKind::of::<Failure>()` never matches anything: assertion failures always report their
    /// variant-level kind (e.g. [`ErrorKind::EqualityMismatch`]).
    pub fn of<E: ?Sized + 'static>() -> Self {
        ErrorKind::Custom(TypeTag::of::<E>())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::EqualityMismatch => "EqualityMismatch",
            ErrorKind::InequalityViolation => "InequalityViolation",
            ErrorKind::BooleanAssertionFailed => "BooleanAssertionFailed",
            ErrorKind::ExplicitFailure => "ExplicitFailure",
            ErrorKind::ExpectedErrorMismatch => "ExpectedErrorMismatch",
            ErrorKind::Panic => "Panic",
            ErrorKind::Custom(tag) => tag.name(),
        }
    }

    /// True for the kinds produced by assertion primitives.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ErrorKind::EqualityMismatch
                | ErrorKind::InequalityViolation
                | ErrorKind::BooleanAssertionFailed
                | ErrorKind::ExplicitFailure
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker;

    #[test]
    fn custom_kinds_match_exactly() {
        assert_eq!(ErrorKind::of::<Marker>(), ErrorKind::of::<Marker>());
        assert_ne!(ErrorKind::of::<Marker>(), ErrorKind::of::<std::io::Error>());
        assert_ne!(ErrorKind::of::<Marker>(), ErrorKind::Panic);
    }

    #[test]
    fn custom_kind_displays_type_name() {
        let kind = ErrorKind::of::<Marker>();
        assert!(kind.to_string().ends_with("Marker"));
    }

    #[test]
    fn assertion_kinds() {
        assert!(ErrorKind::ExplicitFailure.is_assertion());
        assert!(!ErrorKind::ExpectedErrorMismatch.is_assertion());
        assert!(!ErrorKind::Panic.is_assertion());
    }
}
