//! Host-supplied I/O pair (§1, §6): the interpreter core never touches stdio
//! directly, it writes/reads one line at a time through these traits. Shaped
//! after the teacher crate's `PrintWriter` trait and its `StdPrint` /
//! `CollectStringPrint` / `NoPrint` implementors.

use std::io::{self, BufRead, Write as _};

/// Sink for `out_op` output and (optionally) trace lines.
///
/// Implementors write one line at a time; the caller supplies the trailing
/// newline semantics explicitly via `write_line` so a collecting sink can
/// keep lines separate without re-parsing them.
pub trait OutputSink {
    /// Writes one line of `out_op` output (no trailing newline included).
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Source for `inp_op`: one line at a time, no trailing newline.
pub trait InputSource {
    /// Reads the next line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Default `OutputSink` that writes to stdout.
#[derive(Debug, Default)]
pub struct StdOutput;

impl OutputSink for StdOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// `OutputSink` that collects every line into a `Vec<String>`.
///
/// Useful for tests that assert on `out_op` output without touching real
/// stdout.
#[derive(Debug, Default)]
pub struct CollectOutput(pub Vec<String>);

impl CollectOutput {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

impl OutputSink for CollectOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.0.push(line.to_owned());
        Ok(())
    }
}

/// `OutputSink` that discards all output.
#[derive(Debug, Default)]
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn write_line(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Default `InputSource` that reads from stdin.
#[derive(Debug, Default)]
pub struct StdInput;

impl InputSource for StdInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// `InputSource` backed by a fixed, preloaded sequence of lines.
///
/// Useful for tests and for hosts that already have the program's input
/// available in memory.
#[derive(Debug, Default)]
pub struct FixedInput {
    lines: std::collections::VecDeque<String>,
}

impl FixedInput {
    #[must_use]
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for FixedInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
