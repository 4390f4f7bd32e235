//! UDP mirror example
//!
//! Starts a local "aggregator" socket, mirrors records to it and prints what
//! arrives. The console copy switches to JSON once the mirror is configured.
//!
//! Run with: cargo run --example udp_mirror

use fieldlog::prelude::*;
use std::net::UdpSocket;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== fieldlog - UDP Mirror Example ===\n");

    let aggregator = UdpSocket::bind("127.0.0.1:0")?;
    aggregator.set_read_timeout(Some(Duration::from_secs(1)))?;
    let address = aggregator.local_addr()?.to_string();

    let logger = Logger::builder()
        .program_name("udp_mirror")
        .sink(ConsoleSink::stdout())
        .mirror(address.as_str())
        .build()?;

    println!("Mirroring to {} (console is now JSON: {})\n", address, logger.is_json());

    for i in 0..3 {
        logger.info("job finished", &[Field::new("job", i), Field::new("ok", true)]);
    }

    println!("\nReceived by the aggregator:");
    let mut buf = [0u8; 4096];
    while let Ok(len) = aggregator.recv(&mut buf) {
        println!("  {}", String::from_utf8_lossy(&buf[..len]));
    }

    logger.shutdown_mirror(Duration::from_secs(1));
    println!(
        "\nMirror sent {} datagrams, dropped {}",
        logger.metrics().mirror_sent(),
        logger.metrics().mirror_dropped()
    );

    Ok(())
}
