//! Error types for the vivarium_io crate.
//!
//! Provides structured error handling for pattern persistence, token
//! import/export, and settings storage.

use thiserror::Error;
use vivarium_core::EngineError;

/// Reasons an import token is rejected.
///
/// Every variant is recoverable: the caller surfaces it inline and leaves
/// board and history untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Token is not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8
    #[error("token payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Payload is not the expected JSON shape
    #[error("token payload is not a saved state: {0}")]
    Json(#[from] serde_json::Error),

    /// Declared grid size outside the policy bounds
    #[error("grid size {size} outside allowed range {min}..={max}")]
    SizeOutOfRange { size: u16, min: u16, max: u16 },

    /// A listed cell does not fit on the declared grid
    #[error("cell ({row}, {col}) does not fit on a {size}x{size} grid")]
    CellOutOfRange { row: u16, col: u16, size: u16 },
}

/// Main error type for vivarium_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Pattern name rejected at save time
    #[error("invalid pattern name: {0}")]
    InvalidName(String),

    /// Import token rejected
    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors surfaced from the simulation core
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// File system errors
    #[error("file system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Result type alias for vivarium_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new invalid-name error.
    #[must_use]
    pub fn invalid_name<S: Into<String>>(msg: S) -> Self {
        Self::InvalidName(msg.into())
    }
}
