//! # fieldlog
//!
//! A small leveled logger that attaches typed key/value fields to each
//! message and writes them as text or JSON, with an optional best-effort UDP
//! mirror for a remote aggregator.
//!
//! ## Features
//!
//! - **Fields**: booleans, signed integers, strings and errors, encoded once
//! - **Two formats**: one text line or one JSON object per record
//! - **UDP mirror**: fire-and-forget JSON copies that never block the caller
//! - **Thread safe**: reconfigurable through `&self` while other threads log
//!
//! ```
//! use fieldlog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .program_name("billing")
//!     .sink(WriterSink::buffer())
//!     .build()
//!     .expect("no mirror configured");
//!
//! logger.info("invoice sent", &[Field::new("invoice_id", 1042), Field::new("paid", false)]);
//! logger.error("charge failed", &[Field::error(&std::fmt::Error)]);
//! ```
//!
//! ## Limitations
//!
//! Messages, program names and field contents are written verbatim. Neither
//! format escapes them, so a `"` in a message yields invalid JSON and a `\n`
//! splits a text record.

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Field, FieldValue, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, OutputFormat, Result, Sink,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, UdpMirror, WriterSink};
}

pub use crate::core::{
    Field, FieldValue, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, OutputFormat, Result, Sink, TimestampFormat,
};
pub use sinks::{ConsoleSink, FileSink, UdpMirror, WriterSink};
