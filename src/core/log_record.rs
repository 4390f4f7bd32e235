//! Log record passed from the logger to the formatter

use super::field::Field;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// Everything needed to render one log line.
///
/// Records borrow from the caller and only live for a single emission.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub program_name: &'a str,
    pub message: &'a str,
    pub fields: &'a [Field],
}

impl<'a> LogRecord<'a> {
    pub fn new(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        program_name: &'a str,
        message: &'a str,
        fields: &'a [Field],
    ) -> Self {
        Self {
            timestamp,
            level,
            program_name,
            message,
            fields,
        }
    }

    /// Rough upper bound of the rendered size, used to pre-size buffers
    pub(crate) fn size_hint(&self) -> usize {
        let fields: usize = self
            .fields
            .iter()
            .map(|f| f.name().len() + f.value().len() + 6)
            .sum();
        64 + self.program_name.len() + self.message.len() + fields
    }
}
