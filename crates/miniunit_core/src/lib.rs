//! Provide the shared, pure vocabulary of the miniunit runner.
//!
//! This crate is intentionally small and dependency-light. It contains the types that both the assertion
//! primitives (`miniunit_assert`) and the runner (`miniunit`) speak:
//! - the closed [`Failure`] taxonomy and its [`ErrorKind`] tags,
//! - [`Raised`], the single error type a test body can return,
//! - [`TestDeclaration`], the metadata attached to a test method.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no runner-specific types.

#![deny(clippy::unwrap_used)]

pub mod declaration;
pub mod failure;
pub mod kind;
pub mod raised;

pub use declaration::TestDeclaration;
pub use failure::{Failure, ValueSnapshot};
pub use kind::{ErrorKind, TypeTag};
pub use raised::{IntoTestResult, Raised, TestResult};
