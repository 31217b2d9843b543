//! Metadata attached to a test method.

use crate::kind::ErrorKind;

/// Declared expectations of a single test.
///
/// Usually produced by `#[unit_test(...)]` inside a `#[suite]` impl block, but it is a plain value and can be built
/// by hand:
///
/// ```
/// use miniunit_core::{ErrorKind, TestDeclaration};
///
/// let decl = TestDeclaration::new()
///     .named("reads the config")
///     .expect_error::<std::io::Error>();
/// assert_eq!(decl.expected_error, Some(ErrorKind::of::<std::io::Error>()));
/// assert!(!decl.should_fail);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDeclaration {
    /// Overrides the method name in reports.
    pub display_name: Option<String>,
    /// When set, the test passes only if exactly this kind is raised.
    pub expected_error: Option<ErrorKind>,
    /// Inverts the pass/fail interpretation.
    pub should_fail: bool,
}

impl TestDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn expect_error<E: ?Sized + 'static>(self) -> Self {
        self.expect_kind(ErrorKind::of::<E>())
    }

    pub fn expect_kind(mut self, kind: ErrorKind) -> Self {
        self.expected_error = Some(kind);
        self
    }

    pub fn should_fail(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Resolve the name shown in reports.
    ///
    /// A blank display name is ignored; otherwise both names are shown as `"{display} ({method})"`.
    pub fn resolve_name(&self, method_name: &str) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(display) if !display.is_empty() => format!("{display} ({method_name})"),
            _ => method_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_method() {
        assert_eq!(TestDeclaration::new().resolve_name("test_add"), "test_add");
    }

    #[test]
    fn name_combines_display_and_method() {
        let decl = TestDeclaration::new().named("Custom test name");
        assert_eq!(decl.resolve_name("has_name"), "Custom test name (has_name)");
    }

    #[test]
    fn blank_display_name_is_ignored() {
        let decl = TestDeclaration::new().named("   ");
        assert_eq!(decl.resolve_name("has_name"), "has_name");
    }

    #[test]
    fn builder_sets_flags() {
        let decl = TestDeclaration::new().expect_kind(ErrorKind::Panic).should_fail();
        assert_eq!(decl.expected_error, Some(ErrorKind::Panic));
        assert!(decl.should_fail);
    }
}
