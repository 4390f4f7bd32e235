//! Timestamp rendering for log records
//!
//! Text records carry an ISO 8601 timestamp with microsecond precision, JSON
//! records carry nanoseconds since the Unix epoch. Records are always stamped
//! in UTC, so the zone designator in the text form is always `Z`.

use chrono::{DateTime, Utc};

/// Timestamp renderings used by the output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    #[default]
    Iso8601Micros,

    /// Unix timestamp in nanoseconds: `1736332245123456000`
    UnixNanos,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::UnixNanos => unix_nanos(datetime).to_string(),
        }
    }
}

/// Nanoseconds since the Unix epoch.
///
/// Saturates outside the range representable in an `i64` (before 1677 or
/// after 2262).
pub fn unix_nanos(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp_nanos_opt().unwrap_or_else(|| {
        if datetime.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}
