//! Output formats for log records
//!
//! - Text: one human-readable line terminated by `\n`
//! - Json: one JSON object, no trailing newline
//!
//! Neither format escapes the message, the program name or field contents.
//! Callers that log untrusted text must sanitise it first.

use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08T10:30:45.123456Z [server] INFO Request processed status=200`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"time":1736332245123456000,"name":"server","level":"INFO","message":"Request processed","fields":{"status":200}}`
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Render a record to the bytes handed to a sink
    pub fn format(&self, record: &LogRecord<'_>) -> Vec<u8> {
        let rendered = match self {
            OutputFormat::Text => format_text(record),
            OutputFormat::Json => format_json(record),
        };
        rendered.into_bytes()
    }
}

/// `<timestamp> [<program>] <LEVEL> <message> name=value ...\n`
pub fn format_text(record: &LogRecord<'_>) -> String {
    let mut out = String::with_capacity(record.size_hint());
    out.push_str(&TimestampFormat::Iso8601Micros.format(&record.timestamp));
    out.push_str(" [");
    out.push_str(record.program_name);
    out.push_str("] ");
    out.push_str(record.level.to_str());
    out.push(' ');
    out.push_str(record.message);
    for field in record.fields {
        out.push(' ');
        field.write_text(&mut out);
    }
    out.push('\n');
    out
}

/// `{"time":<ns>,"name":"<program>","level":"<LEVEL>","message":"<message>","fields":{...}}`
pub fn format_json(record: &LogRecord<'_>) -> String {
    let mut out = String::with_capacity(record.size_hint());
    out.push_str("{\"time\":");
    out.push_str(&TimestampFormat::UnixNanos.format(&record.timestamp));
    out.push_str(",\"name\":\"");
    out.push_str(record.program_name);
    out.push_str("\",\"level\":\"");
    out.push_str(record.level.to_str());
    out.push_str("\",\"message\":\"");
    out.push_str(record.message);
    out.push_str("\",\"fields\":{");
    for (idx, field) in record.fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        field.write_json(&mut out);
    }
    out.push_str("}}");
    out
}
