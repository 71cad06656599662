//! KiranLink - serial link engine for laser instrument control
//!
//! This library owns the background serial-device communication for an
//! instrument-control front end: a worker thread reads raw bytes,
//! reassembles them into protocol lines, flushes queued outgoing
//! commands, and reports line and connection-health events to a single
//! consumer over a channel.

pub mod config;
pub mod error;
pub mod event;
pub mod framing;
pub mod protocol;
pub mod transport;
pub mod worker;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
pub use event::Event;
pub use worker::{SerialWorker, DEFAULT_READ_TIMEOUT};
