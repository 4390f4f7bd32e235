//! UDP mirror for remote log aggregation
//!
//! Records are handed to a bounded queue and sent as single datagrams by a
//! dedicated thread, so a logging call never waits on the network. UDP is fast
//! but unreliable: datagrams may arrive out of order or not at all, and a full
//! queue drops the record. Losses are counted in [`LoggerMetrics`], never
//! reported to the caller.

use crate::core::{LoggerError, LoggerMetrics, Result};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default number of records that may wait for the mirror thread
pub const DEFAULT_MIRROR_QUEUE_CAPACITY: usize = 1024;

/// Best-effort datagram mirror
///
/// # Example
///
/// ```no_run
/// use fieldlog::sinks::UdpMirror;
///
/// let mirror = UdpMirror::connect("127.0.0.1:5140").expect("valid mirror address");
/// mirror.submit(b"{\"message\":\"hello\"}".to_vec());
/// ```
pub struct UdpMirror {
    address: String,
    peer: SocketAddr,
    local: SocketAddr,
    sender: RwLock<Option<Sender<Vec<u8>>>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
}

impl UdpMirror {
    /// Resolve `address` and open a UDP socket connected to it
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not resolve, or if the local
    /// socket cannot be bound or connected.
    pub fn connect(address: &str) -> Result<Self> {
        Self::connect_with(
            address,
            DEFAULT_MIRROR_QUEUE_CAPACITY,
            Arc::new(LoggerMetrics::new()),
        )
    }

    pub(crate) fn connect_with(
        address: &str,
        queue_capacity: usize,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let peer = address
            .to_socket_addrs()
            .map_err(|e| LoggerError::address(address, e.to_string()))?
            .next()
            .ok_or_else(|| LoggerError::address(address, "no addresses found"))?;

        let bind_addr: SocketAddr = if peer.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).map_err(|e| {
            LoggerError::io_operation("binding mirror socket", bind_addr.to_string(), e)
        })?;
        socket
            .connect(peer)
            .map_err(|e| LoggerError::io_operation("connecting mirror socket", address, e))?;
        let local = socket.local_addr()?;

        let (sender, receiver) = bounded::<Vec<u8>>(queue_capacity.max(1));
        let worker_metrics = Arc::clone(&metrics);

        let handle = thread::Builder::new()
            .name("fieldlog-mirror".to_string())
            .spawn(move || {
                // Runs until every sender is dropped and the queue is drained
                for datagram in receiver.iter() {
                    match socket.send(&datagram) {
                        Ok(_) => {
                            worker_metrics.record_mirror_sent();
                        }
                        Err(_) => {
                            worker_metrics.record_mirror_dropped();
                        }
                    }
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning mirror thread", address, e))?;

        Ok(Self {
            address: address.to_string(),
            peer,
            local,
            sender: RwLock::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
            metrics,
        })
    }

    /// Queue one record for sending and return immediately.
    ///
    /// The record is dropped if the queue is full or the mirror was shut down.
    pub fn submit(&self, datagram: Vec<u8>) {
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            self.metrics.record_mirror_dropped();
            return;
        };

        match sender.try_send(datagram) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_mirror_dropped();
            }
        }
    }

    /// The address string the mirror was configured with
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Resolved remote endpoint
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Ephemeral local endpoint datagrams are sent from
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Stop accepting records and wait for queued ones to be sent
    ///
    /// # Returns
    ///
    /// `true` if the mirror thread finished within `timeout`, `false` otherwise
    pub fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.write().take());

        let Some(handle) = self.handle.lock().take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Mirror thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Mirror thread for {} did not finish within {:?}. \
                     Some records may be lost.",
                    self.address, timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl std::fmt::Debug for UdpMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpMirror")
            .field("address", &self.address)
            .field("peer", &self.peer)
            .field("local", &self.local)
            .finish()
    }
}
