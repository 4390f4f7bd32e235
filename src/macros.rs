//! Logging macros with inline fields.
//!
//! Each macro takes a logger, a message and any number of `key = value`
//! pairs. Keys are identifiers and become field names; values go through
//! [`Field::new`](crate::Field::new). Fields are only built when the level is
//! enabled.
//!
//! # Examples
//!
//! ```
//! use fieldlog::prelude::*;
//! use fieldlog::{info, warn};
//!
//! let logger = Logger::new();
//! logger.set_sink(WriterSink::buffer());
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening", port = port, tls = false);
//!
//! // The global logger works the same way
//! warn!(fieldlog::global::logger(), "Queue backing up", depth = 512);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_sink(WriterSink::buffer());
/// use fieldlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, &format!("Error code: {}", 500), retry = true);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        match (&$logger, $level, &$msg) {
            (logger, level, msg) => {
                let message: &str = ::core::convert::AsRef::<str>::as_ref(msg);
                if logger.is_enabled(level) {
                    logger.log(level, message, &[$($crate::Field::new(stringify!($key), $value)),*]);
                } else {
                    logger.log(level, message, &[]);
                }
            }
        }
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_sink(WriterSink::buffer());
/// # logger.set_min_level(LogLevel::Debug);
/// use fieldlog::debug;
/// debug!(logger, "Cache lookup", key = "user:42", hit = false);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_sink(WriterSink::buffer());
/// use fieldlog::info;
/// info!(logger, "Request served", status = 200, path = "/health");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warn-level message.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_sink(WriterSink::buffer());
/// use fieldlog::warn;
/// warn!(logger, "Slow response", elapsed_ms = 1500);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_sink(WriterSink::buffer());
/// use fieldlog::error;
/// error!(logger, "Upstream unavailable", attempts = 3);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::sinks::WriterSink;
    use crate::{LogLevel, Logger};
    use std::sync::Arc;

    fn logger_with_buffer() -> (Logger, Arc<WriterSink<Vec<u8>>>) {
        let sink = Arc::new(WriterSink::buffer());
        let logger = Logger::new();
        logger.set_program_name("macros");
        logger.set_sink(Arc::clone(&sink));
        (logger, sink)
    }

    #[test]
    fn test_fields_from_key_value_pairs() {
        let (logger, sink) = logger_with_buffer();
        let user = String::from("ada");
        info!(logger, "login", user = &user, admin = true, attempts = 2);
        assert!(sink
            .contents()
            .ends_with("[macros] INFO login user=ada admin=true attempts=2\n"));
    }

    #[test]
    fn test_owned_message_and_trailing_comma() {
        let (logger, sink) = logger_with_buffer();
        let msg = format!("batch {}", 7);
        warn!(logger, msg, size = 10,);
        assert!(sink.contents().contains("WARN batch 7 size=10"));
    }

    #[test]
    fn test_filtered_calls_are_counted() {
        let (logger, sink) = logger_with_buffer();
        debug!(logger, "hidden", x = 1);
        assert!(sink.contents().is_empty());
        assert_eq!(logger.metrics().filtered(), 1);

        logger.set_min_level(LogLevel::Debug);
        debug!(logger, "shown", x = 1);
        assert!(sink.contents().contains("DEBUG shown x=1"));
    }

    #[test]
    fn test_error_and_log_macros() {
        let (logger, sink) = logger_with_buffer();
        error!(logger, "failed");
        log!(logger, LogLevel::Warn, "explicit", code = -1);
        let out = sink.contents();
        assert!(out.contains("ERROR failed\n"));
        assert!(out.contains("WARN explicit code=-1\n"));
    }
}
