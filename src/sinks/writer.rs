//! Sinks backed by an arbitrary `io::Write`

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Adapts any `io::Write` into a [`Sink`].
///
/// Each record is written with a single `write_all` under a mutex, so records
/// from concurrent threads never interleave. Records are written exactly as
/// formatted: JSON records are not newline terminated.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_name(writer, "writer")
    }

    pub fn with_name(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    /// Run `f` with exclusive access to the wrapped writer
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.writer.lock())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<Vec<u8>> {
    /// In-memory sink, mostly useful in tests
    pub fn buffer() -> Self {
        Self::with_name(Vec::new(), "buffer")
    }

    /// Copy of everything written so far, decoded lossily as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer.lock()).into_owned()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        self.writer.lock().write_all(record)?;
        Ok(record.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Unbuffered append-only file sink
pub type FileSink = WriterSink<File>;

impl WriterSink<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        Ok(Self::with_name(file, "file"))
    }
}
