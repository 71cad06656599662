//! Mock transport for testing
//!
//! Stands in for the real serial port in unit tests: reads are fed by
//! the test, writes are captured, and single-shot faults can be staged
//! on either side to exercise the worker's error paths.

use super::Transport;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport for unit testing
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

struct MockTransportInner {
    read_buffer: VecDeque<u8>,
    write_buffer: Vec<u8>,
    read_faults: u32,
    write_faults: u32,
    flush_faults: u32,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(MockTransportInner {
                read_buffer: VecDeque::new(),
                write_buffer: Vec::new(),
                read_faults: 0,
                write_faults: 0,
                flush_faults: 0,
            })),
        }
    }

    /// Inject data to be read
    pub fn inject_read(&self, data: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.read_buffer.extend(data);
    }

    /// Get all written data
    pub fn written(&self) -> Vec<u8> {
        let inner = self.inner.lock().unwrap();
        inner.write_buffer.clone()
    }

    /// Clear written data
    pub fn clear_written(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.write_buffer.clear();
    }

    /// Fail the next `count` reads with an I/O error
    pub fn fail_reads(&self, count: u32) {
        let mut inner = self.inner.lock().unwrap();
        inner.read_faults = count;
    }

    /// Fail the next `count` writes with an I/O error
    pub fn fail_writes(&self, count: u32) {
        let mut inner = self.inner.lock().unwrap();
        inner.write_faults = count;
    }

    /// Fail the next `count` flushes with an I/O error
    pub fn fail_flushes(&self, count: u32) {
        let mut inner = self.inner.lock().unwrap();
        inner.flush_faults = count;
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if inner.read_faults > 0 {
            inner.read_faults -= 1;
            return Err(Error::Other("simulated read fault".to_string()));
        }

        let available = inner.read_buffer.len().min(buffer.len());
        for item in buffer.iter_mut().take(available) {
            *item = inner.read_buffer.pop_front().unwrap();
        }

        Ok(available)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if inner.write_faults > 0 {
            inner.write_faults -= 1;
            return Err(Error::Other("simulated write fault".to_string()));
        }

        inner.write_buffer.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.flush_faults > 0 {
            inner.flush_faults -= 1;
            return Err(Error::Other("simulated flush fault".to_string()));
        }
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
