//! Error types for the face rig control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Serial port operation failed
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Landmark frame decoding failed
    #[error("Frame decode error: {0}")]
    FrameDecode(#[from] serde_json::Error),

    /// Servo table parsing or validation error
    #[error("Servo table error: {0}")]
    Table(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
