//! Transport layer for I/O abstraction

use crate::error::Result;

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::{available_ports, SerialTransport};

/// Transport trait for device communication
///
/// Implementations are moved into the I/O loop thread, which is the
/// sole reader and writer for the life of a connection.
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read
    ///
    /// A bounded read: returns `Ok(0)` when no data arrives within the
    /// transport's timeout rather than blocking indefinitely.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write data from buffer, returns number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> Result<()>;
}
