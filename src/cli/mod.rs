//! CLI for the miniunit runner
//!
//! ## Commands
//!
//! - `selftest` - Run the bundled self-test suite
//! - `list` - List the self-test suite's tests in execution order
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::RunError;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The run never started (bad suite registration).
    pub const CONFIGURATION: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl From<RunError> for CliError {
    fn from(err: RunError) -> Self {
        let exit_code = match &err {
            RunError::Configuration(_) => ExitCode::CONFIGURATION,
            RunError::AggregateRunFailure { .. } => ExitCode::FAILURE,
        };
        let rendered = format!("{:?}", miette::Report::new(err));
        Self::new(rendered, exit_code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// A minimal, self-hosted unit-test runner
#[derive(Parser, Debug)]
#[command(name = "miniunit")]
#[command(version = VERSION)]
#[command(about = "A minimal, self-hosted unit-test runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bundled self-test suite
    Selftest {
        /// Print one line per test instead of progress marks
        #[arg(short, long)]
        verbose: bool,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
        format: ReportFormat,
        /// Exit successfully even when tests fail unexpectedly
        #[arg(long)]
        no_throw: bool,
    },

    /// List the self-test suite's tests in execution order
    List,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// pytest-style progress on stderr
    Console,
    /// One JSON object per line on stdout
    Json,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Selftest {
            verbose,
            format,
            no_throw,
        } => commands::run_selftest(verbose, format, no_throw),
        Command::List => commands::list_tests(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn test_cli_parse_selftest_defaults() {
        let cli = Cli::try_parse_from(["miniunit", "selftest"]).unwrap();
        match cli.command {
            Command::Selftest {
                verbose,
                format,
                no_throw,
            } => {
                assert!(!verbose);
                assert_eq!(format, ReportFormat::Console);
                assert!(!no_throw);
            }
            Command::List => panic!("Expected Selftest command"),
        }
    }

    #[test]
    fn test_cli_parse_selftest_flags() {
        let cli = Cli::try_parse_from(["miniunit", "selftest", "-v", "--format", "json", "--no-throw"]).unwrap();
        if let Command::Selftest {
            verbose,
            format,
            no_throw,
        } = cli.command
        {
            assert!(verbose);
            assert_eq!(format, ReportFormat::Json);
            assert!(no_throw);
        } else {
            panic!("Expected Selftest command");
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["miniunit", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["miniunit", "selftest", "--format", "tap"]).is_err());
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["miniunit"]).is_err());
    }

    #[test]
    fn test_configuration_errors_exit_with_code_2() {
        let err = CliError::from(RunError::from(ConfigurationError::MissingSuite));
        assert_eq!(err.exit_code, ExitCode::CONFIGURATION);
        assert!(err.message.contains("no test suite instance was supplied"));
    }
}
