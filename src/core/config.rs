//! Logger configuration

use super::log_level::LogLevel;
use crate::sinks::DEFAULT_MIRROR_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::Path;

/// Plain description of a logger's settings.
///
/// Missing keys take their defaults when deserialized, so an embedding
/// application can keep only the settings it changes in its own config file.
///
/// ```
/// use fieldlog::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig {
///     min_level: LogLevel::Debug,
///     ..LoggerConfig::default()
/// };
/// assert!(!config.json);
/// assert!(config.mirror_address.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: LogLevel,

    /// Emit JSON instead of text on the primary sink
    pub json: bool,

    /// Overrides the name derived from the running executable
    pub program_name: Option<String>,

    /// `host:port` of a UDP log aggregator; also turns JSON on
    pub mirror_address: Option<String>,

    pub mirror_queue_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            json: false,
            program_name: None,
            mirror_address: None,
            mirror_queue_capacity: DEFAULT_MIRROR_QUEUE_CAPACITY,
        }
    }
}

/// Base name of the running executable.
///
/// Taken from the first process argument, then from the executable path, and
/// `"unknown"` if neither is available.
pub fn default_program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(base_name)
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .as_deref()
                .and_then(|p| base_name(p.as_os_str()))
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn base_name(arg: &OsStr) -> Option<String> {
    Path::new(arg)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
