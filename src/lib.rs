#![forbid(unsafe_code)]
//! miniunit: a minimal, self-hosted unit-test runner.
//!
//! Suites register their test methods together with declared expectations (display name, expected error kind,
//! expected failure). The runner discovers them, executes each one in order behind its own failure boundary,
//! reconciles what was raised against the declaration, and emits one outcome record per test.
//!
//! ```
//! use miniunit::prelude::*;
//!
//! #[derive(Default)]
//! struct StringTests;
//!
//! #[suite]
//! impl StringTests {
//!     #[unit_test]
//!     fn concat(&mut self) -> TestResult {
//!         are_equal_str("foobar", format!("{}{}", "foo", "bar").as_str())?;
//!         Ok(())
//!     }
//!
//!     #[unit_test(should_fail)]
//!     fn broken(&mut self) -> TestResult {
//!         fail("x")?;
//!         Ok(())
//!     }
//! }
//!
//! let report = miniunit::run_tests(Some(StringTests), true).unwrap();
//! assert!(!report.overall_failed());
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Modules enforce
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test bodies**: panics are allowed; the engine catches them and classifies them like any other failure.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

#![deny(clippy::unwrap_used)]

// Lets `#[suite]` refer to `::miniunit` from inside this crate.
extern crate self as miniunit;

pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod prelude;
pub mod reporter;
pub mod selftest;

pub use miniunit_assert::{
    Condition, are_equal, are_equal_str, are_not_equal, are_not_equal_str, fail, is_false, is_true,
};
pub use miniunit_core::{
    ErrorKind, Failure, IntoTestResult, Raised, TestDeclaration, TestResult, TypeTag, ValueSnapshot,
};
pub use miniunit_derive::suite;

pub use config::RunOptions;
pub use discovery::{SuiteBuilder, TestDescriptor, TestRegistration, TestSuite, discover, discover_fresh};
pub use engine::{TestRunner, classify, execute, reconcile, run_tests};
pub use error::{ConfigurationError, RunError};
pub use outcome::{FailureDetail, OutcomeRecord, OutcomeStatus, RunReport, TestSummary};
pub use reporter::{ConsoleReporter, JsonReporter, NullReporter, TestReporter};
