//! Error types for KiranLink

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// KiranLink error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error (open failed: bad port, busy, permission)
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Send attempted with no open connection
    #[error("Serial port is not connected")]
    NotConnected,

    /// I/O loop thread panicked
    #[error("I/O loop thread panicked")]
    ThreadPanic,

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration serialize error
    #[error("Config error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
