//! Events crossing from the I/O loop thread to the consumer
//!
//! The worker never calls back into consumer state from its background
//! thread; everything crosses over a single tagged channel so ordering
//! between line and status events is preserved end to end.

use crossbeam_channel::{Receiver, Sender};

/// A tagged event produced by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A complete, non-empty line received from the device
    Line(String),
    /// Connection-health message (connected, read/write errors, ...)
    Status(String),
}

/// Create the unbounded event channel connecting a worker to its
/// single consumer. Sends never block; a dropped receiver is ignored.
pub fn event_channel() -> (Sender<Event>, Receiver<Event>) {
    crossbeam_channel::unbounded()
}
