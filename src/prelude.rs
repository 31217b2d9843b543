//! Everything a test suite usually needs.
//!
//! ```ignore
//! use miniunit::prelude::*;
//! ```

pub use crate::discovery::{SuiteBuilder, TestRegistration, TestSuite};
pub use crate::{
    ErrorKind, Failure, Raised, TestDeclaration, TestResult, are_equal, are_equal_str, are_not_equal,
    are_not_equal_str, fail, is_false, is_true, suite,
};
