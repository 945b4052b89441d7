//! # Error Types
//!
//! Custom error types for NMEA Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for NMEA Bridge
#[derive(Debug, Error)]
pub enum NmeaBridgeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),
}

/// Result type alias for NMEA Bridge
pub type Result<T> = std::result::Result<T, NmeaBridgeError>;
