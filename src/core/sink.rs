//! Sink trait for primary log destinations

use std::io;
use std::sync::Arc;

/// A destination for formatted log records.
///
/// The logger calls [`write`](Sink::write) once per accepted record, from
/// whichever thread made the logging call, without holding any lock. A sink
/// shared between threads is responsible for keeping concurrent writes from
/// interleaving.
pub trait Sink: Send + Sync {
    /// Write one formatted record, returning the number of bytes accepted
    fn write(&self, record: &[u8]) -> io::Result<usize>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        (**self).write(record)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        (**self).write(record)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
