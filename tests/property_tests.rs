//! Property-based tests for assertions and outcome classification
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use miniunit::{
    ErrorKind, Failure, OutcomeStatus, Raised, RunOptions, TestDeclaration, TestDescriptor, TestRunner, are_equal,
    are_equal_str, are_not_equal, are_not_equal_str, classify, execute, is_false, is_true,
};
use proptest::prelude::*;

// =============================================================================
// Assertion Properties
// =============================================================================

proptest! {
    /// Property: equal values never trip AreEqual and always trip AreNotEqual
    #[test]
    fn equal_values(a in any::<i64>()) {
        prop_assert!(are_equal(a, a).is_ok());
        let err = are_not_equal(a, a).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InequalityViolation);
    }

    /// Property: unequal values always trip AreEqual and never trip AreNotEqual
    #[test]
    fn unequal_values(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        let err = are_equal(a, b).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::EqualityMismatch);
        prop_assert!(are_not_equal(a, b).is_ok());
    }

    /// Property: string overloads agree with the generic ones
    #[test]
    fn string_overloads_agree(a in ".{0,12}", b in ".{0,12}") {
        prop_assert_eq!(are_equal_str(a.as_str(), b.as_str()).is_ok(), are_equal(a.as_str(), b.as_str()).is_ok());
        prop_assert_eq!(
            are_not_equal_str(a.as_str(), b.as_str()).is_ok(),
            are_not_equal(a.as_str(), b.as_str()).is_ok()
        );
    }

    /// Property: string mismatches expose the bytes of both sides
    #[test]
    fn string_mismatch_exposes_bytes(a in ".{0,12}", b in ".{0,12}") {
        prop_assume!(a != b);
        match are_equal_str(a.as_str(), b.as_str()) {
            Err(Failure::EqualityMismatch { expected, actual }) => {
                prop_assert_eq!(expected.utf8_bytes, Some(a.into_bytes()));
                prop_assert_eq!(actual.utf8_bytes, Some(b.into_bytes()));
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    /// Property: IsTrue and IsFalse are exact complements
    #[test]
    fn boolean_assertions(value in any::<bool>()) {
        prop_assert_eq!(is_true(value).is_ok(), value);
        prop_assert_eq!(is_false(value).is_ok(), !value);
        prop_assert_eq!(is_true(|| value).is_ok(), value);
        if let Err(err) = is_true(value) {
            prop_assert_eq!(err, Failure::BooleanAssertionFailed { expected_true: true });
        }
    }
}

// =============================================================================
// Classification Properties
// =============================================================================

proptest! {
    /// Property: a record is unexpected exactly when "failed" and "should fail" disagree
    #[test]
    fn classification_truth_table(failed in any::<bool>(), should_fail in any::<bool>()) {
        let caught = failed.then(|| Raised::from(Failure::explicit("x")));
        let (status, detail) = classify(caught, should_fail);
        prop_assert_eq!(status.is_unexpected(), failed != should_fail);
        prop_assert_eq!(detail.is_some(), failed || should_fail);
    }

    /// Property: the run fails overall iff at least one test failed unexpectedly
    #[test]
    fn overall_failure_is_any_unexpected(plan in prop::collection::vec((any::<bool>(), any::<bool>()), 0..8)) {
        let descriptors = plan
            .iter()
            .enumerate()
            .map(|(i, &(fails, should_fail))| {
                let declaration = if should_fail {
                    TestDeclaration::new().should_fail()
                } else {
                    TestDeclaration::new()
                };
                TestDescriptor::new(format!("t{i}"), &declaration, move || {
                    if fails {
                        Err(Failure::explicit("planned").into())
                    } else {
                        Ok(())
                    }
                })
            })
            .collect();

        let report = TestRunner::new(RunOptions::no_throw()).run(descriptors).unwrap();
        let expected = plan.iter().any(|&(fails, should_fail)| fails != should_fail);
        prop_assert_eq!(report.overall_failed(), expected);
        prop_assert_eq!(report.records().len(), plan.len());
    }

    /// Property: an expected kind that is raised always classifies as Success
    #[test]
    fn expected_kind_raised_is_success(reason in ".{0,20}") {
        let declaration = TestDeclaration::new().expect_kind(ErrorKind::ExplicitFailure);
        let record = execute(TestDescriptor::new("t", &declaration, move || Err(Failure::explicit(reason).into())));
        prop_assert_eq!(record.status(), OutcomeStatus::Success);
    }
}
