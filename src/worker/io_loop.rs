//! I/O loop thread for the serial worker
//!
//! Runs on a dedicated OS thread for the lifetime of one connection.
//! Each iteration drains the outgoing queue, then performs one bounded
//! read (the transport's timeout keeps shutdown latency at one
//! iteration). Steady-state I/O faults degrade to `Status` events and
//! the loop keeps going; only the shutdown flag stops it.

use crate::event::Event;
use crate::framing;
use crate::transport::Transport;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Maximum bytes pulled from the transport per iteration
const READ_CHUNK_SIZE: usize = 256;

/// Delay after a failed read before retrying
const READ_ERROR_BACKOFF: Duration = Duration::from_millis(200);

/// Sleep when a read returns no data, to avoid busy-spinning
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// I/O loop body. Owns the transport and the incoming buffer; nothing
/// else touches either.
pub(super) fn run(
    mut transport: Box<dyn Transport>,
    shutdown: Arc<AtomicBool>,
    outgoing: Receiver<String>,
    events: Sender<Event>,
) {
    let mut buffer: Vec<u8> = Vec::with_capacity(1024);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while !shutdown.load(Ordering::Relaxed) {
        flush_outgoing(transport.as_mut(), &outgoing, &events);

        match transport.read(&mut chunk) {
            Ok(0) => thread::sleep(IDLE_SLEEP),
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);
                while let Some(line) = framing::extract_line(&mut buffer) {
                    // Consecutive terminators frame empty lines; drop them.
                    if !line.is_empty() {
                        let _ = events.send(Event::Line(line));
                    }
                }
            }
            Err(e) => {
                log::warn!("Serial read error: {}", e);
                let _ = events.send(Event::Status(format!("read error: {}", e)));
                thread::sleep(READ_ERROR_BACKOFF);
            }
        }
    }

    // Best-effort teardown: report, never propagate.
    if let Err(e) = transport.flush() {
        log::warn!("Serial close error: {}", e);
        let _ = events.send(Event::Status(format!("close error: {}", e)));
    }

    log::debug!("I/O loop thread exiting");
}

/// Write every currently queued payload in FIFO order. A failed write
/// skips that payload and keeps draining.
fn flush_outgoing(
    transport: &mut dyn Transport,
    outgoing: &Receiver<String>,
    events: &Sender<Event>,
) {
    loop {
        match outgoing.try_recv() {
            Ok(payload) => {
                if let Err(e) = transport.write(payload.as_bytes()) {
                    log::warn!("Serial write error: {}", e);
                    let _ = events.send(Event::Status(format!("write error: {}", e)));
                }
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
}
