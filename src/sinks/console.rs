//! Console sink implementation

use crate::core::Sink;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleTarget {
    /// Unbuffered standard error (default)
    #[default]
    Stderr,
    Stdout,
}

/// Writes records to standard error or standard output.
///
/// JSON records carry no line terminator of their own; the console sink adds
/// one so that each record stays on its own line.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn write_line<W: Write>(mut out: W, record: &[u8]) -> io::Result<usize> {
        out.write_all(record)?;
        if !record.ends_with(b"\n") {
            out.write_all(b"\n")?;
        }
        Ok(record.len())
    }
}

impl Sink for ConsoleSink {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        // Holding the stream lock keeps records from concurrent threads whole
        match self.target {
            ConsoleTarget::Stderr => Self::write_line(io::stderr().lock(), record),
            ConsoleTarget::Stdout => Self::write_line(io::stdout().lock(), record),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self.target {
            ConsoleTarget::Stderr => io::stderr().flush(),
            ConsoleTarget::Stdout => io::stdout().flush(),
        }
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_is_stderr() {
        assert_eq!(ConsoleSink::new().target(), ConsoleTarget::Stderr);
        assert_eq!(ConsoleSink::stdout().target(), ConsoleTarget::Stdout);
    }

    #[test]
    fn test_write_line_terminates_json() {
        let mut buf = Vec::new();
        let written = ConsoleSink::write_line(&mut buf, b"{\"a\":1}").unwrap();
        assert_eq!(written, 7);
        assert_eq!(buf, b"{\"a\":1}\n");
    }

    #[test]
    fn test_write_line_keeps_single_newline() {
        let mut buf = Vec::new();
        ConsoleSink::write_line(&mut buf, b"text line\n").unwrap();
        assert_eq!(buf, b"text line\n");
    }

    #[test]
    fn test_console_write() {
        let sink = ConsoleSink::stderr();
        assert_eq!(sink.write(b"console sink test\n").unwrap(), 18);
        assert!(sink.flush().is_ok());
        assert_eq!(sink.name(), "console");
    }
}
