//! Reporting sinks.
//!
//! The engine's job ends at producing outcome records; a [`TestReporter`] decides what to do with them. Implement
//! the trait for custom output formats (TAP, GUI, ...). Output written by the bundled reporters is best effort: a
//! failed write never affects the run.

use std::io::{self, Write};

use serde::Serialize;

use crate::outcome::{OutcomeRecord, OutcomeStatus, TestSummary};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Trait for reporting test execution results.
pub trait TestReporter {
    /// Called once discovery produced the descriptors, before any test runs
    fn on_collection_complete(&mut self, test_count: usize);

    /// Called when a test starts running
    fn on_test_start(&mut self, _name: &str) {}

    /// Called when a test completes
    fn on_test_complete(&mut self, record: &OutcomeRecord);

    /// Called when all tests have completed
    fn on_run_complete(&mut self, summary: &TestSummary);
}

impl<R: TestReporter + ?Sized> TestReporter for &mut R {
    fn on_collection_complete(&mut self, test_count: usize) {
        (**self).on_collection_complete(test_count);
    }

    fn on_test_start(&mut self, name: &str) {
        (**self).on_test_start(name);
    }

    fn on_test_complete(&mut self, record: &OutcomeRecord) {
        (**self).on_test_complete(record);
    }

    fn on_run_complete(&mut self, summary: &TestSummary) {
        (**self).on_run_complete(summary);
    }
}

impl<R: TestReporter + ?Sized> TestReporter for Box<R> {
    fn on_collection_complete(&mut self, test_count: usize) {
        (**self).on_collection_complete(test_count);
    }

    fn on_test_start(&mut self, name: &str) {
        (**self).on_test_start(name);
    }

    fn on_test_complete(&mut self, record: &OutcomeRecord) {
        (**self).on_test_complete(record);
    }

    fn on_run_complete(&mut self, summary: &TestSummary) {
        (**self).on_run_complete(summary);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl TestReporter for NullReporter {
    fn on_collection_complete(&mut self, _test_count: usize) {}

    fn on_test_complete(&mut self, _record: &OutcomeRecord) {}

    fn on_run_complete(&mut self, _summary: &TestSummary) {}
}

/// Default console reporter (pytest-style)
pub struct ConsoleReporter<W: Write = io::Stderr> {
    out: W,
    verbose: bool,
    color: bool,
}

impl ConsoleReporter {
    pub fn stderr(verbose: bool) -> Self {
        Self::new(io::stderr(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            color: true,
        }
    }

    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn status_color(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Success => GREEN,
        OutcomeStatus::Failure | OutcomeStatus::SuccessButExpectedFailure => RED,
        OutcomeStatus::FailureExpected => YELLOW,
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_collection_complete(&mut self, test_count: usize) {
        let _ = if test_count == 0 {
            writeln!(self.out, "No tests collected")
        } else {
            writeln!(self.out, "collected {test_count} item(s)")
        };
    }

    fn on_test_start(&mut self, name: &str) {
        if self.verbose {
            let executing = self.paint(BLUE, "Executing...");
            let _ = write!(self.out, "{name} ... {executing}\r");
            let _ = self.out.flush();
        }
    }

    fn on_test_complete(&mut self, record: &OutcomeRecord) {
        let status = record.status();
        let color = status_color(status);
        let _ = if self.verbose {
            let label = self.paint(color, status.as_str());
            writeln!(
                self.out,
                "{} ... {} ({:.0}ms)",
                record.name(),
                label,
                record.elapsed().as_secs_f64() * 1000.0
            )
        } else {
            let mark = match status {
                OutcomeStatus::Success => ".",
                OutcomeStatus::Failure => "F",
                OutcomeStatus::SuccessButExpectedFailure => "X",
                OutcomeStatus::FailureExpected => "x",
            };
            let mark = self.paint(color, mark);
            write!(self.out, "{mark}")
        };

        if status.is_unexpected() {
            let name = self.paint(RED, record.name());
            let _ = writeln!(self.out, "\n{name}");
            if let Some(detail) = record.failure_detail() {
                let _ = writeln!(self.out, "    {detail}");
            }
        }
    }

    fn on_run_complete(&mut self, summary: &TestSummary) {
        if !self.verbose {
            let _ = writeln!(self.out);
        }

        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(self.paint(GREEN, &format!("{} passed", summary.passed)));
        }
        if summary.failed > 0 {
            parts.push(self.paint(RED, &format!("{} failed", summary.failed)));
        }
        if summary.xfailed > 0 {
            parts.push(self.paint(YELLOW, &format!("{} xfailed", summary.xfailed)));
        }
        if summary.xpassed > 0 {
            parts.push(self.paint(RED, &format!("{} xpassed", summary.xpassed)));
        }

        let _ = writeln!(
            self.out,
            "====== {} in {:.2}s ======",
            parts.join(", "),
            summary.duration.as_secs_f64()
        );
    }
}

/// One JSON object per line: a `record` event per test, then a `summary` event.
pub struct JsonReporter<W: Write> {
    out: W,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Record(&'a OutcomeRecord),
    Summary(&'a TestSummary),
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &JsonEvent<'_>) {
        if let Err(err) = serde_json::to_writer(&mut self.out, event) {
            tracing::warn!(error = %err, "failed to write JSON report event");
            return;
        }
        let _ = writeln!(self.out);
    }
}

impl<W: Write> TestReporter for JsonReporter<W> {
    fn on_collection_complete(&mut self, _test_count: usize) {}

    fn on_test_complete(&mut self, record: &OutcomeRecord) {
        self.emit(&JsonEvent::Record(record));
    }

    fn on_run_complete(&mut self, summary: &TestSummary) {
        self.emit(&JsonEvent::Summary(summary));
    }
}
