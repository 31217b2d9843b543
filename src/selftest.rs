//! The runner, tested with itself.
//!
//! Every test here is written so that its expected classification is `Success` or `FailureExpected`; a run of
//! [`SelfTests`] therefore never fails overall unless the runner itself is broken. `miniunit selftest` runs it.

use thiserror::Error;

use crate::prelude::*;

/// Raised on purpose by the expected-error tests.
#[derive(Debug, Error)]
#[error("this error is expected")]
pub struct ExpectedSelfTestError;

fn raise_expected() -> Result<(), ExpectedSelfTestError> {
    Err(ExpectedSelfTestError)
}

pub struct SelfTests {
    counter: i32,
}

impl SelfTests {
    pub fn new() -> Self {
        Self { counter: 1 }
    }
}

impl Default for SelfTests {
    fn default() -> Self {
        Self::new()
    }
}

#[suite]
impl SelfTests {
    #[unit_test(name = "Custom test name")]
    fn has_name(&mut self) -> TestResult {
        Ok(())
    }

    #[unit_test]
    fn counter_starts_from_constructor(&mut self) -> TestResult {
        self.counter += 1;
        are_equal(2, self.counter)?;
        Ok(())
    }

    // Same instance as the test above, so the counter has already moved.
    #[unit_test]
    fn counter_is_shared_within_an_instance(&mut self) -> TestResult {
        self.counter += 1;
        are_equal(3, self.counter)?;
        Ok(())
    }

    #[unit_test]
    fn are_equal_strings(&mut self) -> TestResult {
        let mut some_string = String::from("foo");
        some_string += "bar";
        are_equal_str("foobar", some_string.as_str())?;
        Ok(())
    }

    #[unit_test]
    fn are_not_equal_strings(&mut self) -> TestResult {
        let mut some_string = String::from("foo");
        some_string += "bar";
        are_not_equal_str("xpto", some_string.as_str())?;
        Ok(())
    }

    #[unit_test]
    fn absent_values_are_equal(&mut self) -> TestResult {
        are_equal::<Option<&str>>(None, None)?;
        Ok(())
    }

    #[unit_test]
    fn is_true_value(&mut self) -> TestResult {
        is_true(true)?;
        Ok(())
    }

    #[unit_test]
    fn is_true_predicate(&mut self) -> TestResult {
        is_true(|| true)?;
        Ok(())
    }

    #[unit_test(should_fail)]
    fn is_true_fails(&mut self) -> TestResult {
        is_true(false)?;
        Ok(())
    }

    #[unit_test]
    fn is_false_value(&mut self) -> TestResult {
        is_false(false)?;
        Ok(())
    }

    #[unit_test]
    fn is_false_predicate(&mut self) -> TestResult {
        is_false(|| false)?;
        Ok(())
    }

    #[unit_test(should_fail)]
    fn is_false_fails(&mut self) -> TestResult {
        is_false(true)?;
        Ok(())
    }

    #[unit_test(should_fail)]
    fn assert_fail(&mut self) -> TestResult {
        fail("This test should fail!")?;
        Ok(())
    }

    #[unit_test(expected_error = ExpectedSelfTestError)]
    fn expected_error_is_raised(&mut self) -> TestResult {
        raise_expected()?;
        fail("This test should not have failed, the error was expected")?;
        Ok(())
    }

    #[unit_test(expected_error = ExpectedSelfTestError, should_fail)]
    fn fails_if_expected_error_is_not_raised(&mut self) -> TestResult {
        Ok(())
    }

    #[unit_test(expected_kind = ErrorKind::EqualityMismatch)]
    fn expected_assertion_kind(&mut self) -> TestResult {
        are_equal(1, 2)?;
        Ok(())
    }

    #[unit_test(should_fail)]
    fn panics_count_as_failures(&mut self) {
        let values: Vec<i32> = Vec::new();
        let _ = values[self.counter as usize];
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{OutcomeStatus, run_tests};

    #[test]
    fn selftest_suite_passes() {
        let report = run_tests(Some(SelfTests::new()), true).unwrap();
        assert!(!report.overall_failed());
        assert_eq!(report.records().len(), 17);
    }

    #[test]
    fn selftest_classifications() {
        let report = run_tests(Some(SelfTests::new()), true).unwrap();
        let status = |name: &str| report.record(name).unwrap().status();
        assert_eq!(status("Custom test name (has_name)"), OutcomeStatus::Success);
        assert_eq!(status("counter_is_shared_within_an_instance"), OutcomeStatus::Success);
        assert_eq!(status("assert_fail"), OutcomeStatus::FailureExpected);
        assert_eq!(status("expected_error_is_raised"), OutcomeStatus::Success);
        assert_eq!(status("fails_if_expected_error_is_not_raised"), OutcomeStatus::FailureExpected);
        assert_eq!(status("panics_count_as_failures"), OutcomeStatus::FailureExpected);
    }
}
