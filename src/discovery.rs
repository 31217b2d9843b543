//! Test discovery: from a suite instance to an ordered list of executable descriptors.
//!
//! Suites describe their tests through an explicit registration table ([`TestSuite::registrations`]), written
//! either by the `#[suite]` macro or by hand with [`SuiteBuilder`]. Discovery validates that table and binds every
//! entry to the supplied instance.
//!
//! ## Instance sharing
//!
//! All descriptors discovered from one `Rc<RefCell<S>>` share that instance: state mutated by one test is visible
//! to the tests that run after it. Construct a fresh instance per run when tests must not see each other's state.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::error::ConfigurationError;
use crate::{ErrorKind, TestDeclaration, TestResult};

/// A test body bound to nothing yet: a method taking the suite instance.
pub type TestBody<S> = fn(&mut S) -> TestResult;

/// One entry of a suite's registration table.
pub struct TestRegistration<S> {
    method_name: &'static str,
    declaration: TestDeclaration,
    body: TestBody<S>,
}

impl<S> TestRegistration<S> {
    pub fn new(method_name: &'static str, declaration: TestDeclaration, body: TestBody<S>) -> Self {
        Self {
            method_name,
            declaration,
            body,
        }
    }

    pub fn method_name(&self) -> &'static str {
        self.method_name
    }

    pub fn declaration(&self) -> &TestDeclaration {
        &self.declaration
    }
}

impl<S> fmt::Debug for TestRegistration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRegistration")
            .field("method_name", &self.method_name)
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

/// A type whose instances carry tests.
///
/// Implemented by `#[suite]`, or by hand:
///
/// ```
/// use miniunit::{SuiteBuilder, TestDeclaration, TestRegistration, TestResult, TestSuite};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Counter {
///     fn bump(&mut self) -> TestResult {
///         self.hits += 1;
///         miniunit::are_equal(1, self.hits)?;
///         Ok(())
///     }
/// }
///
/// impl TestSuite for Counter {
///     fn registrations() -> Vec<TestRegistration<Self>> {
///         SuiteBuilder::new()
///             .test("bump", TestDeclaration::new(), Counter::bump)
///             .build()
///     }
/// }
///
/// let report = miniunit::run_tests(Some(Counter::default()), true).unwrap();
/// assert!(!report.overall_failed());
/// ```
pub trait TestSuite: Sized + 'static {
    /// Tests in declaration order.
    fn registrations() -> Vec<TestRegistration<Self>>;
}

/// Hand-written registration table.
pub struct SuiteBuilder<S> {
    registrations: Vec<TestRegistration<S>>,
}

impl<S> SuiteBuilder<S> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    pub fn test(mut self, method_name: &'static str, declaration: TestDeclaration, body: TestBody<S>) -> Self {
        self.registrations
            .push(TestRegistration::new(method_name, declaration, body));
        self
    }

    pub fn build(self) -> Vec<TestRegistration<S>> {
        self.registrations
    }
}

impl<S> Default for SuiteBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved, executable test. Consumed by the engine when it runs.
pub struct TestDescriptor {
    name: String,
    method_name: String,
    invoke: Box<dyn FnOnce() -> TestResult>,
    expected_error: Option<ErrorKind>,
    should_fail: bool,
}

impl TestDescriptor {
    /// Build a descriptor around an arbitrary callable.
    pub fn new(
        method_name: impl Into<String>,
        declaration: &TestDeclaration,
        invoke: impl FnOnce() -> TestResult + 'static,
    ) -> Self {
        let method_name = method_name.into();
        Self {
            name: declaration.resolve_name(&method_name),
            method_name,
            invoke: Box::new(invoke),
            expected_error: declaration.expected_error,
            should_fail: declaration.should_fail,
        }
    }

    /// Name shown in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn expected_error(&self) -> Option<ErrorKind> {
        self.expected_error
    }

    pub fn should_fail(&self) -> bool {
        self.should_fail
    }

    pub(crate) fn into_invoke(self) -> Box<dyn FnOnce() -> TestResult> {
        self.invoke
    }
}

impl fmt::Debug for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDescriptor")
            .field("name", &self.name)
            .field("expected_error", &self.expected_error.map(|k| k.name()))
            .field("should_fail", &self.should_fail)
            .finish_non_exhaustive()
    }
}

/// Discover the tests of `suite`, bound to that instance, in declaration order.
///
/// ## Errors
///
/// - [`ConfigurationError::MissingSuite`] if `suite` is `None`
/// - [`ConfigurationError::EmptyMethodName`] if a registration has a blank method name
/// - [`ConfigurationError::DuplicateTest`] if a method is registered twice
#[tracing::instrument(skip_all, fields(suite = std::any::type_name::<S>()))]
pub fn discover<S: TestSuite>(suite: Option<&Rc<RefCell<S>>>) -> Result<Vec<TestDescriptor>, ConfigurationError> {
    let suite = suite.ok_or(ConfigurationError::MissingSuite)?;

    let registrations = S::registrations();
    let mut seen = HashSet::with_capacity(registrations.len());
    let mut descriptors = Vec::with_capacity(registrations.len());

    for registration in registrations {
        let method_name = registration.method_name;
        if method_name.trim().is_empty() {
            return Err(ConfigurationError::EmptyMethodName);
        }
        if !seen.insert(method_name) {
            return Err(ConfigurationError::DuplicateTest {
                method: method_name.to_string(),
            });
        }

        let instance = Rc::clone(suite);
        let body = registration.body;
        descriptors.push(TestDescriptor::new(
            method_name,
            &registration.declaration,
            move || body(&mut instance.borrow_mut()),
        ));
    }

    tracing::debug!(test_count = descriptors.len(), "discovered tests");
    Ok(descriptors)
}

/// Discover the tests of a brand-new default instance. Returns the instance too, so callers can inspect its state.
pub fn discover_fresh<S: TestSuite + Default>() -> Result<(Rc<RefCell<S>>, Vec<TestDescriptor>), ConfigurationError> {
    let suite = Rc::new(RefCell::new(S::default()));
    let descriptors = discover(Some(&suite))?;
    Ok((suite, descriptors))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Failure;

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    impl Counter {
        fn bump(&mut self) -> TestResult {
            self.hits += 1;
            Ok(())
        }

        fn explode(&mut self) -> TestResult {
            Err(Failure::explicit("boom").into())
        }
    }

    impl TestSuite for Counter {
        fn registrations() -> Vec<TestRegistration<Self>> {
            SuiteBuilder::new()
                .test("bump", TestDeclaration::new().named("Bumps"), Counter::bump)
                .test("explode", TestDeclaration::new().should_fail(), Counter::explode)
                .build()
        }
    }

    struct Twice;

    impl TestSuite for Twice {
        fn registrations() -> Vec<TestRegistration<Self>> {
            SuiteBuilder::new()
                .test("same", TestDeclaration::new(), |_| Ok(()))
                .test("same", TestDeclaration::new(), |_| Ok(()))
                .build()
        }
    }

    struct Blank;

    impl TestSuite for Blank {
        fn registrations() -> Vec<TestRegistration<Self>> {
            SuiteBuilder::new().test("  ", TestDeclaration::new(), |_| Ok(())).build()
        }
    }

    #[test]
    fn missing_suite_is_a_configuration_error() {
        let err = discover::<Counter>(None).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingSuite);
    }

    #[test]
    fn descriptors_follow_registration_order_and_resolve_names() {
        let (_, descriptors) = discover_fresh::<Counter>().unwrap();
        let names: Vec<_> = descriptors.iter().map(TestDescriptor::name).collect();
        assert_eq!(names, ["Bumps (bump)", "explode"]);
        assert!(descriptors[1].should_fail());
        assert_eq!(descriptors[0].expected_error(), None);
    }

    #[test]
    fn descriptors_share_the_instance() {
        let (suite, descriptors) = discover_fresh::<Counter>().unwrap();
        for descriptor in descriptors {
            let _ = (descriptor.into_invoke())();
        }
        assert_eq!(suite.borrow().hits, 1);

        let (fresh, _) = discover_fresh::<Counter>().unwrap();
        assert_eq!(fresh.borrow().hits, 0);
    }

    #[test]
    fn duplicate_methods_are_rejected() {
        let err = discover_fresh_err::<Twice>(Twice);
        assert_eq!(
            err,
            ConfigurationError::DuplicateTest {
                method: "same".to_string()
            }
        );
    }

    #[test]
    fn blank_method_names_are_rejected() {
        assert_eq!(discover_fresh_err::<Blank>(Blank), ConfigurationError::EmptyMethodName);
    }

    fn discover_fresh_err<S: TestSuite>(suite: S) -> ConfigurationError {
        let suite = Rc::new(RefCell::new(suite));
        discover(Some(&suite)).unwrap_err()
    }
}
