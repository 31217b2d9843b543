//! Run configuration.
//!
//! Options come from code (`RunOptions { .. }`), from the CLI flags, or from the environment:
//!
//! - `MINIUNIT_THROW_ON_FAILURE`: `0`, `false`, `no` or `off` stops the runner from raising an aggregate error
//! - `MINIUNIT_VERBOSE`: `1`, `true`, `yes` or `on` makes reporters print per-test progress

use std::env;

pub const THROW_ON_FAILURE_ENV: &str = "MINIUNIT_THROW_ON_FAILURE";
pub const VERBOSE_ENV: &str = "MINIUNIT_VERBOSE";

/// Options for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Raise `RunError::AggregateRunFailure` when any test fails unexpectedly.
    pub throw_if_any_test_fails: bool,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            throw_if_any_test_fails: true,
            verbose: false,
        }
    }
}

impl RunOptions {
    /// Defaults, but never raise the aggregate error; callers inspect the report instead.
    pub fn no_throw() -> Self {
        Self {
            throw_if_any_test_fails: false,
            ..Self::default()
        }
    }

    /// Defaults overridden by `MINIUNIT_*` environment variables. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(value) = lookup(THROW_ON_FAILURE_ENV) {
            match parse_flag(&value) {
                Some(flag) => options.throw_if_any_test_fails = flag,
                None => tracing::warn!(variable = THROW_ON_FAILURE_ENV, value = %value, "ignoring unrecognised flag"),
            }
        }
        if let Some(value) = lookup(VERBOSE_ENV) {
            match parse_flag(&value) {
                Some(flag) => options.verbose = flag,
                None => tracing::warn!(variable = VERBOSE_ENV, value = %value, "ignoring unrecognised flag"),
            }
        }
        options
    }
}

/// Parse a boolean-ish flag value.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
