//! Serial worker: connection lifecycle and the background I/O loop
//!
//! The worker owns at most one serial connection at a time. `connect`
//! opens the port and starts exactly one I/O loop thread; `disconnect`
//! signals it and joins before returning, so no thread outlives a
//! connect/disconnect cycle. `send` only enqueues — callers (typically
//! a UI thread) never block on I/O.
//!
//! # Thread Model
//!
//! 1. **Caller thread**: `connect` / `disconnect` / `send`. Shares only
//!    the shutdown flag and the outgoing channel with the loop.
//! 2. **I/O loop thread** (see [`io_loop`]): sole owner of the
//!    transport and the incoming buffer; drains the outgoing queue and
//!    frames incoming bytes into [`Event::Line`] events.
//!
//! # Link State
//!
//! Idle ↔ Running, held as `Option<ActiveLink>`. The Connecting and
//! Stopping phases live entirely inside `connect`/`disconnect`, which
//! take `&mut self` and therefore cannot interleave.

mod io_loop;

use crate::error::{Error, Result};
use crate::event::{event_channel, Event};
use crate::transport::{SerialTransport, Transport};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default read timeout bounding each loop iteration
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// State of one open connection
struct ActiveLink {
    /// Shutdown signal - set to true to stop the I/O loop thread
    shutdown: Arc<AtomicBool>,
    /// I/O loop thread handle - joined on disconnect
    handle: JoinHandle<()>,
    /// Producer side of the outgoing FIFO
    outgoing: Sender<String>,
    /// Port label, for logging
    port_name: String,
}

/// Background serial worker with a dedicated I/O loop thread.
pub struct SerialWorker {
    link: Option<ActiveLink>,
    event_tx: Sender<Event>,
}

impl SerialWorker {
    /// Create a worker and the event receiver for its single consumer.
    pub fn new() -> (Self, Receiver<Event>) {
        let (event_tx, event_rx) = event_channel();
        (
            SerialWorker {
                link: None,
                event_tx,
            },
            event_rx,
        )
    }

    /// Open a serial connection and start the I/O loop thread.
    ///
    /// Any existing connection is fully torn down first (loop stopped
    /// and joined). An open failure is returned to the caller and no
    /// thread is started. On success a `Status("connected: <port>")`
    /// event is emitted.
    pub fn connect(&mut self, port: &str, baud: u32, timeout: Duration) -> Result<()> {
        self.disconnect()?;
        let transport = SerialTransport::open(port, baud, timeout)?;
        self.start_loop(Box::new(transport), port)
    }

    /// Like [`connect`](Self::connect), but over an injected transport.
    ///
    /// Used by tests with [`MockTransport`](crate::transport::MockTransport)
    /// in place of a real port.
    pub fn connect_with_transport(
        &mut self,
        transport: Box<dyn Transport>,
        label: &str,
    ) -> Result<()> {
        self.disconnect()?;
        self.start_loop(transport, label)
    }

    /// Stop the I/O loop and release the connection. Idempotent.
    ///
    /// Blocks until the loop thread has exited. Observed shutdown
    /// latency is at most one loop iteration (read timeout plus
    /// backoff sleep in the worst case).
    pub fn disconnect(&mut self) -> Result<()> {
        let Some(link) = self.link.take() else {
            return Ok(());
        };

        link.shutdown.store(true, Ordering::Relaxed);
        link.handle.join().map_err(|_| Error::ThreadPanic)?;

        log::info!("Disconnected from {}", link.port_name);
        Ok(())
    }

    /// Enqueue a payload for the I/O loop to write. Returns
    /// immediately; never blocks on actual I/O.
    pub fn send(&mut self, text: &str) -> Result<()> {
        let link = self.link.as_ref().ok_or(Error::NotConnected)?;
        link.outgoing
            .send(text.to_string())
            .map_err(|_| Error::NotConnected)
    }

    /// Whether a connection is currently open
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Port label of the open connection, if any
    pub fn port_name(&self) -> Option<&str> {
        self.link.as_ref().map(|l| l.port_name.as_str())
    }

    fn start_loop(&mut self, transport: Box<dyn Transport>, port_name: &str) -> Result<()> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let (out_tx, out_rx) = crossbeam_channel::unbounded();

        let loop_shutdown = Arc::clone(&shutdown);
        let loop_events = self.event_tx.clone();
        let handle = thread::Builder::new()
            .name("kiran-io".to_string())
            .spawn(move || io_loop::run(transport, loop_shutdown, out_rx, loop_events))
            .map_err(|e| Error::Other(format!("Failed to spawn I/O thread: {}", e)))?;

        self.link = Some(ActiveLink {
            shutdown,
            handle,
            outgoing: out_tx,
            port_name: port_name.to_string(),
        });

        log::info!("Connected to {}", port_name);
        let _ = self
            .event_tx
            .send(Event::Status(format!("connected: {}", port_name)));
        Ok(())
    }
}

impl Drop for SerialWorker {
    fn drop(&mut self) {
        let _ = self.disconnect();
    }
}
