//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};

use crate::config::RunOptions;
use crate::discovery::discover_fresh;
use crate::engine::TestRunner;
use crate::outcome::RunReport;
use crate::reporter::{ConsoleReporter, JsonReporter, TestReporter};
use crate::selftest::SelfTests;

use super::{CliError, CliResult, ExitCode, ReportFormat};

/// Run the bundled self-test suite.
///
/// Options start from the `MINIUNIT_*` environment variables; flags given on the command line win.
pub fn run_selftest(verbose: bool, format: ReportFormat, no_throw: bool) -> CliResult<ExitCode> {
    let options = selftest_options(RunOptions::from_env(), verbose, no_throw);
    let reporter: Box<dyn TestReporter> = match format {
        ReportFormat::Console => Box::new(ConsoleReporter::stderr(options.verbose)),
        ReportFormat::Json => Box::new(JsonReporter::new(io::stdout())),
    };
    run_selftest_with(options, reporter).map(|_| ExitCode::SUCCESS)
}

/// Run [`SelfTests`] on a fresh instance through `reporter`.
pub fn run_selftest_with<R: TestReporter>(options: RunOptions, reporter: R) -> CliResult<RunReport> {
    let (_, descriptors) = discover_fresh::<SelfTests>().map_err(crate::error::RunError::from)?;
    let mut runner = TestRunner::with_reporter(options, reporter);
    Ok(runner.run(descriptors)?)
}

/// Print the resolved name of every self-test, one per line, in execution order.
pub fn list_tests() -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_test_list(&mut out)?;
    Ok(ExitCode::SUCCESS)
}

fn write_test_list(out: &mut impl Write) -> CliResult<()> {
    let (_, descriptors) = discover_fresh::<SelfTests>().map_err(crate::error::RunError::from)?;
    for descriptor in &descriptors {
        writeln!(out, "{}", descriptor.name()).map_err(|e| CliError::failure(format!("Error writing test list: {e}")))?;
    }
    Ok(())
}

fn selftest_options(mut options: RunOptions, verbose: bool, no_throw: bool) -> RunOptions {
    options.verbose |= verbose;
    if no_throw {
        options.throw_if_any_test_fails = false;
    }
    options
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;

    #[test]
    fn flags_override_environment() {
        let from_env = RunOptions {
            throw_if_any_test_fails: true,
            verbose: false,
        };
        let options = selftest_options(from_env, true, true);
        assert!(options.verbose);
        assert!(!options.throw_if_any_test_fails);
    }

    #[test]
    fn flags_never_turn_verbose_off() {
        let from_env = RunOptions {
            throw_if_any_test_fails: true,
            verbose: true,
        };
        assert!(selftest_options(from_env, false, false).verbose);
    }

    #[test]
    fn selftest_runs_clean() {
        let report = run_selftest_with(RunOptions::default(), NullReporter).unwrap();
        assert!(!report.overall_failed());
        assert_eq!(report.summary().total, report.records().len());
    }

    #[test]
    fn list_prints_resolved_names_in_order() {
        let mut out = Vec::new();
        write_test_list(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let names: Vec<&str> = out.lines().collect();
        assert_eq!(names.first(), Some(&"Custom test name (has_name)"));
        assert_eq!(names.last(), Some(&"panics_count_as_failures"));
        assert_eq!(names.len(), 17);
    }
}
