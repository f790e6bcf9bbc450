//! Error types shared across the geodata workspace

use thiserror::Error;

/// Result type alias for geodata operations
pub type Result<T> = std::result::Result<T, GeodataError>;

/// Main error type for geodata components
#[derive(Error, Debug)]
pub enum GeodataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl GeodataError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
