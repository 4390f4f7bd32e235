//! Basic logger usage example
//!
//! Demonstrates text and JSON output, fields and level gating on the console.
//!
//! Run with: cargo run --example basic_usage

use fieldlog::prelude::*;
use fieldlog::{global, info, warn};

fn main() -> Result<()> {
    println!("=== fieldlog - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .program_name("basic_usage")
        .min_level(LogLevel::Debug)
        .sink(ConsoleSink::stdout())
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[Field::new("attempt", 1)]);
    logger.warn("This is a warning message", &[Field::new("retry", true)]);
    logger.error(
        "This is an error message",
        &[Field::error(&std::io::Error::new(std::io::ErrorKind::TimedOut, "connection timed out"))],
    );

    println!("\n2. Minimum level set to WARN - debug and info won't show:");
    logger.set_min_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)", &[]);
    logger.info("Info message (hidden)", &[]);
    warn!(logger, "Warning message (visible)", queue_depth = 512);

    println!("\n3. JSON output:");
    logger.set_json(true);
    warn!(logger, "Disk almost full", mount = "/var", free_mb = 120);

    println!("\n4. Process-wide logger (writes to stderr):");
    info!(global::logger(), "Hello from the global logger", pid = std::process::id() as i64);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
