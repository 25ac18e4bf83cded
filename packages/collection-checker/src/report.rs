//! Console output of reports.
//!
//! Errors go to stderr in red, warnings to stdout in yellow, everything else
//! to stdout unstyled. `console` drops the colours when the stream is not a
//! terminal.

use std::io::{self, Stderr, Stdout, Write};

use console::style;

use crate::error::Result;
use crate::types::{Report, Severity};

/// Writes reports to an output and an error stream.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter bound to the process stdout/stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Write a single report.
    pub fn emit(&mut self, report: &Report) -> Result<()> {
        match report.severity {
            Severity::Info => writeln!(self.out, "{}", report.message)?,
            Severity::Warning => writeln!(self.out, "{}", style(&report.message).yellow())?,
            Severity::Error => {
                // Keep stdout ahead of stderr when both go to the same terminal.
                self.out.flush()?;
                writeln!(self.err, "{}", style(&report.message).red().for_stderr())?;
            }
        }
        Ok(())
    }

    /// Write reports in order.
    pub fn emit_all<'a>(&mut self, reports: impl IntoIterator<Item = &'a Report>) -> Result<()> {
        for report in reports {
            self.emit(report)?;
        }
        self.flush()
    }

    /// Shorthand for an informational line.
    pub fn info(&mut self, message: impl Into<String>) -> Result<()> {
        self.emit(&Report::info(message))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
