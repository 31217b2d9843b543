//! What a test body hands back on its error path.
//!
//! Test bodies return [`TestResult`]. Assertion primitives return `Result<(), Failure>`, user code returns whatever
//! error type it likes, and both funnel into [`Raised`] through `?`. Panics are turned into [`Raised::Panic`] by the
//! runner. The runner's per-test boundary is the only place a `Raised` is ever inspected.

use std::error::Error;
use std::fmt;

use crate::failure::Failure;
use crate::kind::{ErrorKind, TypeTag};

/// Result type returned by every test body.
pub type TestResult = Result<(), Raised>;

/// An error raised by a test body.
///
/// `Raised` intentionally does not implement [`std::error::Error`]; this keeps the blanket
/// `From<E: Error>` conversion coherent (the same trick `anyhow::Error` uses).
pub enum Raised {
    /// An assertion primitive (or the runner's reconciliation step) failed.
    Failure(Failure),
    /// Any other error, tagged with the concrete type it was raised as.
    Error {
        kind: ErrorKind,
        source: Box<dyn Error + Send + Sync + 'static>,
    },
    /// The test body panicked; `message` is the panic payload when it was a string.
    Panic { message: String },
}

impl Raised {
    /// Kind used for reconciliation against a declared expected kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Raised::Failure(failure) => failure.kind(),
            Raised::Error { kind, .. } => *kind,
            Raised::Panic { .. } => ErrorKind::Panic,
        }
    }

    /// Wrap an already-boxed error. The kind is taken from the caller since the concrete type is erased.
    pub fn boxed(kind: ErrorKind, source: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Raised::Error { kind, source }
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Raised::Panic {
            message: message.into(),
        }
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Raised::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Raised::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl<E> From<E> for Raised
where
    E: Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        let kind = ErrorKind::Custom(TypeTag::of::<E>());
        let boxed: Box<dyn Error + Send + Sync + 'static> = Box::new(err);
        match boxed.downcast::<Failure>() {
            Ok(failure) => Raised::Failure(*failure),
            Err(source) => Raised::Error { kind, source },
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Failure(failure) => write!(f, "{failure}"),
            Raised::Error { kind, source } => write!(f, "{kind}: {source}"),
            Raised::Panic { message } => write!(f, "panicked: {message}"),
        }
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Failure(failure) => f.debug_tuple("Failure").field(failure).finish(),
            Raised::Error { kind, source } => f
                .debug_struct("Error")
                .field("kind", &kind.name())
                .field("source", source)
                .finish(),
            Raised::Panic { message } => f.debug_struct("Panic").field("message", message).finish(),
        }
    }
}

/// Conversion from a test method's return value into a [`TestResult`].
///
/// Lets a test method return `()` (relying on panics) or any `Result<(), E>` whose error converts into [`Raised`].
pub trait IntoTestResult {
    fn into_test_result(self) -> TestResult;
}

impl IntoTestResult for () {
    fn into_test_result(self) -> TestResult {
        Ok(())
    }
}

impl<E: Into<Raised>> IntoTestResult for Result<(), E> {
    fn into_test_result(self) -> TestResult {
        self.map_err(Into::into)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    fn write_to_disk() -> Result<(), DiskError> {
        Err(DiskError)
    }

    fn check_something() -> Result<(), Failure> {
        Err(Failure::explicit("nope"))
    }

    fn raise_disk() -> TestResult {
        write_to_disk()?;
        Ok(())
    }

    fn raise_failure() -> TestResult {
        check_something()?;
        Ok(())
    }

    #[test]
    fn question_mark_tags_custom_errors_with_their_type() {
        let raised = raise_disk().unwrap_err();
        assert_eq!(raised.kind(), ErrorKind::of::<DiskError>());
        assert!(raised.to_string().ends_with("disk on fire"));
    }

    #[test]
    fn failures_keep_their_variant_kind() {
        let raised = raise_failure().unwrap_err();
        assert_eq!(raised.kind(), ErrorKind::ExplicitFailure);
        assert_eq!(raised.into_failure(), Some(Failure::explicit("nope")));
    }

    #[test]
    fn unit_and_results_convert() {
        assert!(().into_test_result().is_ok());
        let failed: Result<(), Failure> = Err(Failure::explicit("x"));
        assert_eq!(failed.into_test_result().unwrap_err().kind(), ErrorKind::ExplicitFailure);
    }

    #[test]
    fn panic_kind() {
        assert_eq!(Raised::panic("boom").kind(), ErrorKind::Panic);
    }
}
