//! Configuration for the KiranLink monitor
//!
//! Loads configuration from a TOML file with the minimal parameters
//! needed to open and drive the instrument link.

use crate::error::Result;
use crate::worker::DEFAULT_READ_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub link: LinkConfig,
    pub logging: LoggingConfig,
}

/// Serial link configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// Serial port path (e.g., "/dev/ttyUSB0", "COM3")
    pub port: String,
    /// Baud rate (e.g., 9600, 115200)
    pub baud: u32,
    /// Read timeout in milliseconds (bounds each loop iteration)
    pub read_timeout_ms: u64,
    /// Append CRLF to outgoing commands
    ///
    /// The instrument expects `\r\n`-terminated commands, but this is a
    /// caller-side convention: the worker writes payloads verbatim.
    pub append_crlf: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig {
                port: "/dev/ttyUSB0".to_string(),
                baud: 9600,
                read_timeout_ms: DEFAULT_READ_TIMEOUT.as_millis() as u64,
                append_crlf: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.link.port, "/dev/ttyUSB0");
        assert_eq!(config.link.baud, 9600);
        assert_eq!(config.link.read_timeout_ms, 100);
        assert!(config.link.append_crlf);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[link]"));
        assert!(toml_string.contains("[logging]"));
        assert!(toml_string.contains("baud = 9600"));
        assert!(toml_string.contains("port = \"/dev/ttyUSB0\""));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[link]
port = "COM4"
baud = 115200
read_timeout_ms = 50
append_crlf = false

[logging]
level = "debug"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.link.port, "COM4");
        assert_eq!(config.link.baud, 115200);
        assert_eq!(config.link.read_timeout_ms, 50);
        assert!(!config.link.append_crlf);
        assert_eq!(config.logging.level, "debug");
    }
}
