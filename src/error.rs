//! # Error Types
//!
//! This module defines error types used throughout the placard library.

use thiserror::Error;

/// Main error type for placard operations
#[derive(Debug, Error)]
pub enum PlacardError {
    /// Invalid input or settings, caught before any output is produced
    #[error("Validation error: {0}")]
    Validation(String),

    /// QR encoding failure for a payload
    #[error("Encode error: {0}")]
    Encode(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Custom template script error (compile, validation, or eval)
    #[error("Script error: {0}")]
    Script(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
