//! Assertion primitives for miniunit test suites.
//!
//! Every primitive returns `Result<(), Failure>`: a no-op on success, a typed [`Failure`] on violation. Test bodies
//! propagate them with `?`; the runner's per-test boundary is the only place they are caught.

#![deny(clippy::unwrap_used)]

pub mod condition;
pub mod testing;

pub use condition::Condition;
pub use miniunit_core::Failure;
pub use testing::{are_equal, are_equal_str, are_not_equal, are_not_equal_str, fail, is_false, is_true};
