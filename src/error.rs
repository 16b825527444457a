//! Error types for Jumpy

use thiserror::Error;

/// The main error type for Jumpy operations
#[derive(Debug, Error)]
pub enum JumpyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for Jumpy operations
pub type Result<T> = std::result::Result<T, JumpyError>;
