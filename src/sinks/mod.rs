//! Sink and mirror implementations

pub mod console;
pub mod udp;
pub mod writer;

pub use console::{ConsoleSink, ConsoleTarget};
pub use udp::{UdpMirror, DEFAULT_MIRROR_QUEUE_CAPACITY};
pub use writer::{FileSink, WriterSink};

pub use crate::core::Sink;
