//! Integration tests for fieldlog
//!
//! These tests verify:
//! - Text and JSON records as written to a sink
//! - Level gating
//! - UDP mirroring and the JSON switch it implies
//! - Silent handling of sink failures
//! - Fail-fast configuration errors

use fieldlog::sinks::{FileSink, WriterSink};
use fieldlog::{Field, LogLevel, Logger, LoggerError, Sink};
use std::fs;
use std::io;
use std::net::UdpSocket;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct CountingSink {
    writes: AtomicUsize,
}

impl CountingSink {
    fn count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Sink for CountingSink {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record.len())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn buffered_logger(program: &str) -> (Logger, Arc<WriterSink<Vec<u8>>>) {
    let sink = Arc::new(WriterSink::buffer());
    let logger = Logger::new();
    logger.set_program_name(program);
    logger.set_sink(Arc::clone(&sink));
    (logger, sink)
}

fn udp_receiver() -> (UdpSocket, String) {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("Failed to bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("Failed to set read timeout");
    let addr = socket.local_addr().expect("local addr").to_string();
    (socket, addr)
}

fn recv_json(socket: &UdpSocket) -> serde_json::Value {
    let mut buf = [0u8; 4096];
    let len = socket.recv(&mut buf).expect("Expected a mirrored datagram");
    serde_json::from_slice(&buf[..len]).expect("Mirrored datagram should be JSON")
}

#[test]
fn test_text_record_layout() {
    let (logger, sink) = buffered_logger("svc");
    logger.info(
        "The quick brown fox jumps over the lazy dog",
        &[
            Field::new("string", "value1"),
            Field::new("int", 40000),
            Field::new("bool", true),
        ],
    );

    let content = sink.contents();
    let (timestamp, rest) = content.split_once(' ').expect("timestamp separator");
    assert_eq!(
        rest,
        "[svc] INFO The quick brown fox jumps over the lazy dog string=value1 int=40000 bool=true\n"
    );

    // 2025-01-08T10:30:45.123456Z
    assert_eq!(timestamp.len(), 27, "timestamp was {}", timestamp);
    assert!(timestamp.ends_with('Z'));
    assert_eq!(&timestamp[10..11], "T");
    assert_eq!(&timestamp[19..20], ".");
}

#[test]
fn test_json_record_layout() {
    let (logger, sink) = buffered_logger("svc");
    logger.set_json(true);
    logger.warn("disk", &[Field::new("free", 12), Field::new("mount", "/data")]);

    let content = sink.contents();
    assert!(content.starts_with("{\"time\":"));
    assert!(content.ends_with(
        ",\"name\":\"svc\",\"level\":\"WARN\",\"message\":\"disk\",\"fields\":{\"free\":12,\"mount\":\"/data\"}}"
    ));

    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    let nanos = parsed["time"].as_i64().expect("integer time");
    let now = chrono::Utc::now().timestamp_nanos_opt().expect("in range");
    assert!(nanos <= now && now - nanos < 60_000_000_000);
}

#[test]
fn test_json_without_fields_has_empty_object() {
    let (logger, sink) = buffered_logger("svc");
    logger.set_json(true);
    logger.error("bare", &[]);
    assert!(sink.contents().ends_with("\"message\":\"bare\",\"fields\":{}}"));
}

#[test]
fn test_error_level_gate() {
    let sink = Arc::new(CountingSink::default());
    let logger = Logger::new();
    logger.set_sink(Arc::clone(&sink));
    logger.set_min_level(LogLevel::Error);

    logger.debug("d", &[Field::new("x", 1)]);
    logger.info("i", &[Field::new("x", 1)]);
    logger.warn("w", &[Field::new("x", 1)]);
    assert_eq!(sink.count(), 0);

    logger.error("e", &[Field::new("x", 1)]);
    assert_eq!(sink.count(), 1);
}

#[test]
fn test_every_level_at_debug() {
    let (logger, sink) = buffered_logger("svc");
    logger.set_min_level(LogLevel::Debug);

    logger.debug("one", &[]);
    logger.info("two", &[]);
    logger.warn("three", &[]);
    logger.error("four", &[]);

    let content = sink.contents();
    let levels: Vec<&str> = content
        .lines()
        .map(|line| line.split(' ').nth(2).expect("level column"))
        .collect();
    assert_eq!(levels, vec!["DEBUG", "INFO", "WARN", "ERROR"]);
}

#[test]
fn test_error_field_in_both_formats() {
    let (logger, sink) = buffered_logger("svc");
    let err = io::Error::new(io::ErrorKind::NotFound, "boom");

    logger.error("lookup failed", &[Field::error(&err)]);
    assert!(sink.contents().ends_with("lookup failed error=boom\n"));

    logger.set_json(true);
    logger.error("lookup failed", &[Field::error(&err)]);
    assert!(sink.contents().ends_with("\"fields\":{\"error\":\"boom\"}}"));
}

#[test]
fn test_mirror_receives_json_and_forces_json_mode() {
    let (receiver, addr) = udp_receiver();
    let (logger, sink) = buffered_logger("mirrored");
    assert!(!logger.is_json());

    logger.set_server(&addr).expect("Failed to configure mirror");
    assert!(logger.is_json());

    logger.info("hello", &[Field::new("n", 1)]);

    let mirrored = recv_json(&receiver);
    assert_eq!(mirrored["name"], "mirrored");
    assert_eq!(mirrored["level"], "INFO");
    assert_eq!(mirrored["message"], "hello");
    assert_eq!(mirrored["fields"]["n"], 1);

    // The primary copy is JSON too and carries the same timestamp
    let local: serde_json::Value =
        serde_json::from_str(&sink.contents()).expect("primary sink should hold JSON");
    assert_eq!(local["time"], mirrored["time"]);

    assert!(logger.shutdown_mirror(Duration::from_secs(2)));
    assert_eq!(logger.metrics().mirror_sent(), 1);
}

#[test]
fn test_mirror_is_json_even_if_text_is_restored() {
    let (receiver, addr) = udp_receiver();
    let (logger, sink) = buffered_logger("svc");
    logger.set_server(&addr).expect("Failed to configure mirror");

    // Explicitly going back to text only affects the primary sink
    logger.set_json(false);
    logger.warn("mixed", &[Field::new("ok", false)]);

    assert!(sink.contents().ends_with("[svc] WARN mixed ok=false\n"));
    let mirrored = recv_json(&receiver);
    assert_eq!(mirrored["level"], "WARN");
    assert_eq!(mirrored["fields"]["ok"], false);

    logger.shutdown_mirror(Duration::from_secs(2));
}

#[test]
fn test_filtered_calls_are_not_mirrored() {
    let (receiver, addr) = udp_receiver();
    receiver
        .set_read_timeout(Some(Duration::from_millis(200)))
        .expect("Failed to set read timeout");

    let (logger, _sink) = buffered_logger("svc");
    logger.set_server(&addr).expect("Failed to configure mirror");
    logger.debug("below threshold", &[]);
    assert!(logger.shutdown_mirror(Duration::from_secs(2)));

    let mut buf = [0u8; 256];
    assert!(receiver.recv(&mut buf).is_err(), "nothing should be mirrored");
}

#[test]
fn test_bad_mirror_address_fails_fast() {
    let (logger, sink) = buffered_logger("svc");

    let err = logger
        .set_server("this-host-does-not-exist.invalid:9999")
        .expect_err("Resolution must fail");
    assert!(matches!(err, LoggerError::AddressResolution { .. }));

    let err = logger.set_server("missing-port").expect_err("No port");
    assert!(matches!(err, LoggerError::AddressResolution { .. }));

    // Nothing changed: still text, still the same sink
    assert!(!logger.has_mirror());
    logger.info("still text", &[]);
    assert!(sink.contents().ends_with("[svc] INFO still text\n"));
}

#[test]
fn test_sink_failure_never_reaches_caller() {
    struct BrokenPipe;

    impl Sink for BrokenPipe {
        fn write(&self, _record: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    let logger = Logger::new();
    logger.set_sink(BrokenPipe);
    for _ in 0..5 {
        logger.error("lost", &[]);
    }
    assert_eq!(logger.metrics().write_errors(), 5);
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::new();
    logger.set_program_name("filer");
    logger.set_sink(FileSink::open(&log_file).expect("Failed to open log file"));

    for i in 0..3 {
        logger.info("entry", &[Field::new("i", i)]);
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].ends_with("[filer] INFO entry i=2"));
}

#[test]
fn test_sink_swap_takes_effect_immediately() {
    let (logger, first) = buffered_logger("svc");
    logger.info("to first", &[]);

    let second = Arc::new(WriterSink::buffer());
    logger.set_sink(Arc::clone(&second));
    logger.info("to second", &[]);

    assert!(first.contents().contains("to first"));
    assert!(!first.contents().contains("to second"));
    assert!(second.contents().contains("to second"));
}
