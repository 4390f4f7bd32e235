//! Process-wide logger
//!
//! A single [`Logger`] created on first use with the default configuration
//! (INFO, text, standard error, no mirror). It lives for the rest of the
//! process. The free functions here forward to it, so applications can log
//! without passing a handle around:
//!
//! ```
//! use fieldlog::{global, Field, LogLevel};
//!
//! global::set_min_level(LogLevel::Warn);
//! global::warn("cache miss rate high", &[Field::new("rate_pct", 42)]);
//! global::reset();
//! ```
//!
//! Tests that touch the global logger share it with every other test in the
//! same binary; call [`reset`] when done and serialize such tests.

use crate::core::{Field, LogLevel, Logger, Result, Sink};
use std::sync::{Arc, OnceLock};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, created on first access
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}

pub fn set_min_level(level: LogLevel) {
    logger().set_min_level(level);
}

pub fn set_json(json: bool) {
    logger().set_json(json);
}

pub fn set_program_name(name: impl Into<String>) {
    logger().set_program_name(name);
}

pub fn set_sink<S: Sink + 'static>(sink: S) {
    logger().set_sink(sink);
}

/// See [`Logger::try_set_sink`]
pub fn try_set_sink(sink: Option<Arc<dyn Sink>>) -> Result<()> {
    logger().try_set_sink(sink)
}

/// See [`Logger::set_server`]
pub fn set_server(address: &str) -> Result<()> {
    logger().set_server(address)
}

/// Restore the default configuration
pub fn reset() {
    logger().reset();
}

pub fn debug(message: &str, fields: &[Field]) {
    logger().debug(message, fields);
}

pub fn info(message: &str, fields: &[Field]) {
    logger().info(message, fields);
}

pub fn warn(message: &str, fields: &[Field]) {
    logger().warn(message, fields);
}

pub fn error(message: &str, fields: &[Field]) {
    logger().error(message, fields);
}
