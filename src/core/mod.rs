//! Core logger types and traits

pub mod config;
pub mod error;
pub mod field;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod timestamp;

pub use config::{default_program_name, LoggerConfig};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
