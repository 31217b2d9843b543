//! Execution & outcome engine.
//!
//! Runs descriptors one at a time, in discovery order, on the calling thread. Per test:
//!
//! 1. start a stopwatch and invoke the body behind an unwind boundary,
//! 2. stop the stopwatch (on every path, including panics),
//! 3. [`reconcile`] whatever was raised against the declared expected kind,
//! 4. [`classify`] the result against `should_fail`,
//! 5. emit an [`OutcomeRecord`].
//!
//! A test that never returns blocks the run; there is no timeout.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Instant;

use crate::config::RunOptions;
use crate::discovery::{TestDescriptor, TestSuite, discover};
use crate::error::RunError;
use crate::outcome::{FailureDetail, OutcomeRecord, OutcomeStatus, RunReport};
use crate::reporter::{NullReporter, TestReporter};
use crate::{ErrorKind, Failure, Raised};

/// Run every test of `suite` with default options and no reporter.
///
/// Returns the report when no test failed unexpectedly, or when `throw_if_any_test_fails` is false (inspect
/// [`RunReport::overall_failed`] yourself in that case).
///
/// ## Errors
///
/// - [`RunError::Configuration`] if `suite` is `None`, or its registration table is malformed
/// - [`RunError::AggregateRunFailure`] if `throw_if_any_test_fails` and at least one test failed unexpectedly
pub fn run_tests<S: TestSuite>(suite: Option<S>, throw_if_any_test_fails: bool) -> Result<RunReport, RunError> {
    let suite = suite.map(|s| Rc::new(RefCell::new(s)));
    let descriptors = discover(suite.as_ref())?;
    let options = RunOptions {
        throw_if_any_test_fails,
        ..RunOptions::default()
    };
    TestRunner::new(options).run(descriptors)
}

/// Sequential test runner reporting to `R`.
pub struct TestRunner<R: TestReporter = NullReporter> {
    options: RunOptions,
    reporter: R,
}

impl TestRunner<NullReporter> {
    pub fn new(options: RunOptions) -> Self {
        Self::with_reporter(options, NullReporter)
    }
}

impl<R: TestReporter> TestRunner<R> {
    pub fn with_reporter(options: RunOptions, reporter: R) -> Self {
        Self { options, reporter }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Discover and run the tests of a shared suite instance.
    ///
    /// ## Errors
    ///
    /// See [`TestRunner::run`]; discovery errors are reported as [`RunError::Configuration`].
    pub fn run_suite<S: TestSuite>(&mut self, suite: &Rc<RefCell<S>>) -> Result<RunReport, RunError> {
        let descriptors = discover(Some(suite))?;
        self.run(descriptors)
    }

    /// Run descriptors in order and aggregate their outcomes.
    ///
    /// ## Errors
    ///
    /// [`RunError::AggregateRunFailure`] when the options ask for it and any test failed unexpectedly. The error
    /// carries the full report.
    #[tracing::instrument(skip_all, fields(test_count = descriptors.len()))]
    pub fn run(&mut self, descriptors: Vec<TestDescriptor>) -> Result<RunReport, RunError> {
        let started = Instant::now();
        self.reporter.on_collection_complete(descriptors.len());

        let mut records = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            self.reporter.on_test_start(descriptor.name());
            let record = execute(descriptor);

            if record.status().is_unexpected() {
                let detail = record.failure_detail().map(ToString::to_string).unwrap_or_default();
                tracing::warn!(
                    test = record.name(),
                    status = %record.status(),
                    detail = %detail,
                    "test did not meet its expectation"
                );
            } else {
                tracing::debug!(test = record.name(), status = %record.status(), elapsed = ?record.elapsed());
            }

            self.reporter.on_test_complete(&record);
            records.push(record);
        }

        let report = RunReport::new(records, started.elapsed());
        let summary = report.summary();
        self.reporter.on_run_complete(&summary);
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            xfailed = summary.xfailed,
            xpassed = summary.xpassed,
            "test run finished"
        );

        if self.options.throw_if_any_test_fails && report.overall_failed() {
            return Err(RunError::AggregateRunFailure {
                failed: summary.unexpected(),
                total: summary.total,
                report: Box::new(report),
            });
        }
        Ok(report)
    }
}

/// Run a single descriptor to completion and classify it.
pub fn execute(descriptor: TestDescriptor) -> OutcomeRecord {
    let name = descriptor.name().to_string();
    let expected_error = descriptor.expected_error();
    let should_fail = descriptor.should_fail();
    let invoke = descriptor.into_invoke();

    let stopwatch = Instant::now();
    let caught = match panic::catch_unwind(AssertUnwindSafe(invoke)) {
        Ok(Ok(())) => None,
        Ok(Err(raised)) => Some(raised),
        Err(payload) => Some(Raised::panic(panic_message(payload.as_ref()))),
    };
    let elapsed = stopwatch.elapsed();

    let caught = reconcile(expected_error, caught);
    let (status, detail) = classify(caught, should_fail);
    OutcomeRecord::new(name, elapsed, status, detail)
}

/// Match a raised error against the declared expected kind.
///
/// - no expectation: `caught` passes through unchanged
/// - expected and nothing raised: [`Failure::ExpectedErrorMismatch`] with no thrown kind
/// - expected and exactly that kind raised: cleared
/// - expected and another kind raised: [`Failure::ExpectedErrorMismatch`] naming both kinds
pub fn reconcile(expected: Option<ErrorKind>, caught: Option<Raised>) -> Option<Raised> {
    let Some(expected_kind) = expected else {
        return caught;
    };
    match caught {
        None => Some(Raised::Failure(Failure::ExpectedErrorMismatch {
            expected_kind,
            thrown_kind: None,
        })),
        Some(raised) if raised.kind() == expected_kind => None,
        Some(raised) => Some(Raised::Failure(Failure::ExpectedErrorMismatch {
            expected_kind,
            thrown_kind: Some(raised.kind()),
        })),
    }
}

/// Classify a reconciled result against `should_fail`.
pub fn classify(caught: Option<Raised>, should_fail: bool) -> (OutcomeStatus, Option<FailureDetail>) {
    match (caught, should_fail) {
        (None, false) => (OutcomeStatus::Success, None),
        (None, true) => (OutcomeStatus::SuccessButExpectedFailure, Some(FailureDetail::UnexpectedPass)),
        (Some(raised), true) => (OutcomeStatus::FailureExpected, Some(raised.into())),
        (Some(raised), false) => (OutcomeStatus::Failure, Some(raised.into())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
