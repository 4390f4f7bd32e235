//! Main logger implementation

use super::{
    config::{default_program_name, LoggerConfig},
    error::{LoggerError, Result},
    field::Field,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    sink::Sink,
};
use crate::sinks::{ConsoleSink, UdpMirror, DEFAULT_MIRROR_QUEUE_CAPACITY};
use chrono::Utc;
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Leveled logger writing to one primary sink and an optional UDP mirror.
///
/// All configuration goes through `&self`, so a logger can live in a `static`
/// or behind an `Arc` and be reconfigured while other threads log. Each
/// setting is read independently; a change spanning several settings is not
/// observed atomically by concurrent calls.
///
/// # Example
///
/// ```
/// use fieldlog::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(WriterSink::buffer());
/// let logger = Logger::new();
/// logger.set_program_name("server");
/// logger.set_sink(Arc::clone(&sink));
///
/// logger.info("listening", &[Field::new("port", 8080)]);
/// assert!(sink.contents().ends_with("[server] INFO listening port=8080\n"));
/// ```
pub struct Logger {
    min_level: AtomicU8,
    json: AtomicBool,
    program_name: RwLock<Arc<str>>,
    sink: RwLock<Arc<dyn Sink>>,
    mirror: RwLock<Option<Arc<UdpMirror>>>,
    mirror_queue_capacity: AtomicUsize,
    /// Metrics for observability (emitted, filtered, write errors, mirror losses)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with the default configuration: INFO, text, standard error, no mirror
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: AtomicU8::new(LogLevel::Info.as_u8()),
            json: AtomicBool::new(false),
            program_name: RwLock::new(Arc::from(default_program_name())),
            sink: RwLock::new(Arc::new(ConsoleSink::stderr())),
            mirror: RwLock::new(None),
            mirror_queue_capacity: AtomicUsize::new(DEFAULT_MIRROR_QUEUE_CAPACITY),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Build a logger from a [`LoggerConfig`], writing to standard error
    ///
    /// # Errors
    ///
    /// Fails if `mirror_address` is set and cannot be resolved or opened.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let logger = Self::new();
        logger.apply_config(config)?;
        Ok(logger)
    }

    fn apply_config(&self, config: &LoggerConfig) -> Result<()> {
        self.set_min_level(config.min_level);
        self.set_json(config.json);
        if let Some(ref name) = config.program_name {
            self.set_program_name(name.as_str());
        }
        self.set_mirror_queue_capacity(config.mirror_queue_capacity);
        if let Some(ref address) = config.mirror_address {
            self.set_server(address)?;
        }
        Ok(())
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    /// Whether a call at `level` would be emitted
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.as_u8() >= self.min_level.load(Ordering::Relaxed)
    }

    /// Choose JSON (`true`) or text (`false`) for the primary sink
    pub fn set_json(&self, json: bool) {
        self.json.store(json, Ordering::Relaxed);
    }

    pub fn is_json(&self) -> bool {
        self.json.load(Ordering::Relaxed)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.is_json())
    }

    pub fn set_program_name(&self, name: impl Into<String>) {
        *self.program_name.write() = Arc::from(name.into());
    }

    pub fn program_name(&self) -> Arc<str> {
        self.program_name.read().clone()
    }

    /// Replace the primary sink for all subsequent calls
    pub fn set_sink<S: Sink + 'static>(&self, sink: S) {
        self.set_shared_sink(Arc::new(sink));
    }

    pub fn set_shared_sink(&self, sink: Arc<dyn Sink>) {
        *self.sink.write() = sink;
    }

    /// Replace the primary sink, rejecting a missing one
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for `None`; the current
    /// sink is kept.
    pub fn try_set_sink(&self, sink: Option<Arc<dyn Sink>>) -> Result<()> {
        let sink = sink.ok_or_else(|| LoggerError::config("sink", "no sink supplied"))?;
        self.set_shared_sink(sink);
        Ok(())
    }

    /// Name of the current primary sink
    pub fn sink_name(&self) -> String {
        self.sink.read().name().to_string()
    }

    /// Queue size used by the next [`set_server`](Self::set_server)
    pub fn set_mirror_queue_capacity(&self, capacity: usize) {
        self.mirror_queue_capacity
            .store(capacity.max(1), Ordering::Relaxed);
    }

    /// Mirror every accepted record, as JSON, to a UDP aggregator at `address`.
    ///
    /// Also switches the primary sink to JSON. A previously configured mirror
    /// is replaced and drains in the background.
    ///
    /// # Errors
    ///
    /// Fails immediately if the address cannot be resolved or the socket cannot
    /// be opened; the logger's configuration is then left unchanged.
    pub fn set_server(&self, address: &str) -> Result<()> {
        let mirror = UdpMirror::connect_with(
            address,
            self.mirror_queue_capacity.load(Ordering::Relaxed),
            Arc::clone(&self.metrics),
        )?;
        *self.mirror.write() = Some(Arc::new(mirror));
        self.set_json(true);
        Ok(())
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.read().is_some()
    }

    /// Resolved address of the configured mirror
    pub fn mirror_addr(&self) -> Option<SocketAddr> {
        self.mirror.read().as_ref().map(|m| m.peer_addr())
    }

    /// Detach the mirror and wait up to `timeout` for queued records to be sent.
    ///
    /// JSON mode stays on. Returns `true` if there was no mirror or it drained
    /// in time.
    pub fn shutdown_mirror(&self, timeout: Duration) -> bool {
        let mirror = self.mirror.write().take();
        match mirror {
            Some(mirror) => mirror.shutdown(timeout),
            None => true,
        }
    }

    /// Restore the defaults: INFO, text, standard error, no mirror, derived
    /// program name, zeroed metrics
    pub fn reset(&self) {
        self.set_min_level(LogLevel::Info);
        self.set_json(false);
        self.set_program_name(default_program_name());
        self.set_sink(ConsoleSink::stderr());
        *self.mirror.write() = None;
        self.set_mirror_queue_capacity(DEFAULT_MIRROR_QUEUE_CAPACITY);
        self.metrics.reset();
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let sink = self.sink.read().clone();
        sink.flush()?;
        Ok(())
    }

    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field]) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        self.emit(level, message, fields);
    }

    #[inline]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Format and dispatch an accepted record.
    ///
    /// No lock is held while formatting or writing: the sink, mirror and
    /// program name are cloned out of their locks first.
    fn emit(&self, level: LogLevel, message: &str, fields: &[Field]) {
        // One timestamp for both copies so the mirror and the sink agree
        let timestamp = Utc::now();
        let program_name = self.program_name();
        let record = LogRecord::new(timestamp, level, &program_name, message, fields);

        let format = self.output_format();
        let bytes = format.format(&record);

        let mirror = self.mirror.read().clone();
        if let Some(mirror) = mirror {
            let datagram = match format {
                OutputFormat::Json => bytes.clone(),
                OutputFormat::Text => OutputFormat::Json.format(&record),
            };
            mirror.submit(datagram);
        }

        let sink = self.sink.read().clone();
        match sink.write(&bytes) {
            Ok(_) => {
                self.metrics.record_emitted();
            }
            Err(_) => {
                self.metrics.record_write_error();
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level())
            .field("json", &self.is_json())
            .field("program_name", &self.program_name())
            .field("sink", &self.sink_name())
            .field("mirror", &self.mirror_addr())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use fieldlog::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .program_name("worker")
///     .sink(WriterSink::buffer())
///     .build()
///     .expect("no mirror to resolve");
///
/// assert_eq!(logger.min_level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
        }
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json(mut self, json: bool) -> Self {
        self.config.json = json;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.config.program_name = Some(name.into());
        self
    }

    /// Primary sink; standard error if never called
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// UDP aggregator address; implies JSON output
    #[must_use = "builder methods return a new value"]
    pub fn mirror(mut self, address: impl Into<String>) -> Self {
        self.config.mirror_address = Some(address.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn mirror_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.mirror_queue_capacity = capacity;
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Fails if a mirror address was given and cannot be resolved or opened.
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new();
        if let Some(sink) = self.sink {
            logger.set_shared_sink(sink);
        }
        logger.apply_config(&self.config)?;
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
