//! Errors that may escape a test run.
//!
//! Only two things ever reach the caller: a [`ConfigurationError`] (before any test executes) and the aggregate
//! failure raised after all tests completed. Everything a test body raises is caught at the per-test boundary and
//! turned into an outcome record.

use miette::Diagnostic;
use thiserror::Error;

use crate::outcome::RunReport;

/// The run could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("no test suite instance was supplied")]
    #[diagnostic(
        code(miniunit::config::missing_suite),
        help("construct the suite and pass it as `Some(suite)`")
    )]
    MissingSuite,

    #[error("a test was registered with an empty method name")]
    #[diagnostic(code(miniunit::config::empty_method_name))]
    EmptyMethodName,

    #[error("method `{method}` is registered as a test more than once")]
    #[diagnostic(
        code(miniunit::config::duplicate_test),
        help("a method carries exactly one test declaration")
    )]
    DuplicateTest { method: String },
}

/// Error returned by a run.
#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    /// At least one test failed unexpectedly and the run was configured to signal it.
    #[error("{failed} of {total} test(s) did not meet their expectation")]
    #[diagnostic(code(miniunit::run::failed), help("see the outcome records for details"))]
    AggregateRunFailure {
        failed: usize,
        total: usize,
        report: Box<RunReport>,
    },
}

impl RunError {
    /// The finished run, if the error was raised after tests executed.
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunError::AggregateRunFailure { report, .. } => Some(report),
            RunError::Configuration(_) => None,
        }
    }

    pub fn into_report(self) -> Option<RunReport> {
        match self {
            RunError::AggregateRunFailure { report, .. } => Some(*report),
            RunError::Configuration(_) => None,
        }
    }
}
