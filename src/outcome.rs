//! Outcome records: what the engine emits once per test per run.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::{ErrorKind, Failure, Raised};

/// Classification of one executed test against its declared expectations.
///
/// A test moves `Pending → Running → <one of these>`; the variants are the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutcomeStatus {
    /// No failure, none expected.
    Success,
    /// A failure nobody asked for.
    Failure,
    /// Declared `should_fail`, but nothing failed (xpass).
    SuccessButExpectedFailure,
    /// Declared `should_fail`, and it failed (xfail).
    FailureExpected,
}

impl OutcomeStatus {
    /// Whether this outcome makes the whole run fail.
    pub fn is_unexpected(self) -> bool {
        matches!(self, OutcomeStatus::Failure | OutcomeStatus::SuccessButExpectedFailure)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Success => "PASSED",
            OutcomeStatus::Failure => "FAILED",
            OutcomeStatus::SuccessButExpectedFailure => "XPASS",
            OutcomeStatus::FailureExpected => "XFAIL",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a test did not simply pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureDetail {
    /// Something was raised. `failure` keeps the structured payload when it was a [`Failure`].
    Raised {
        kind: ErrorKind,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        failure: Option<Failure>,
    },
    /// Declared `should_fail`, yet the body completed.
    UnexpectedPass,
}

impl FailureDetail {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FailureDetail::Raised { kind, .. } => Some(*kind),
            FailureDetail::UnexpectedPass => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            FailureDetail::Raised { failure, .. } => failure.as_ref(),
            FailureDetail::UnexpectedPass => None,
        }
    }
}

impl From<Raised> for FailureDetail {
    fn from(raised: Raised) -> Self {
        FailureDetail::Raised {
            kind: raised.kind(),
            message: raised.to_string(),
            failure: raised.into_failure(),
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureDetail::Raised { message, .. } => f.write_str(message),
            FailureDetail::UnexpectedPass => f.write_str("test passed but was expected to fail"),
        }
    }
}

/// The result of running one test descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    name: String,
    status: OutcomeStatus,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_detail: Option<FailureDetail>,
}

impl OutcomeRecord {
    pub fn new(
        name: impl Into<String>,
        elapsed: Duration,
        status: OutcomeStatus,
        failure_detail: Option<FailureDetail>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            elapsed,
            failure_detail,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn failure_detail(&self) -> Option<&FailureDetail> {
        self.failure_detail.as_ref()
    }
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

/// Summary of test run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub xfailed: usize,
    pub xpassed: usize,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl TestSummary {
    pub fn unexpected(&self) -> usize {
        self.failed + self.xpassed
    }
}

/// Every record of a finished run, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    records: Vec<OutcomeRecord>,
    overall_failed: bool,
    elapsed: Duration,
}

impl RunReport {
    pub fn new(records: Vec<OutcomeRecord>, elapsed: Duration) -> Self {
        let overall_failed = records.iter().any(|r| r.status().is_unexpected());
        Self {
            records,
            overall_failed,
            elapsed,
        }
    }

    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<OutcomeRecord> {
        self.records
    }

    /// True when any record is a `Failure` or a `SuccessButExpectedFailure`.
    pub fn overall_failed(&self) -> bool {
        self.overall_failed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn record(&self, name: &str) -> Option<&OutcomeRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn summary(&self) -> TestSummary {
        let mut summary = TestSummary {
            total: self.records.len(),
            duration: self.elapsed,
            ..TestSummary::default()
        };
        for record in &self.records {
            match record.status() {
                OutcomeStatus::Success => summary.passed += 1,
                OutcomeStatus::Failure => summary.failed += 1,
                OutcomeStatus::FailureExpected => summary.xfailed += 1,
                OutcomeStatus::SuccessButExpectedFailure => summary.xpassed += 1,
            }
        }
        summary
    }
}
