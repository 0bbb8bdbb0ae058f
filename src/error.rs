//! Error types for tablelog
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TableLogError
pub type Result<T> = std::result::Result<T, TableLogError>;

/// Unified error type for tablelog operations
#[derive(Debug, Error)]
pub enum TableLogError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Key Generation Errors
    // -------------------------------------------------------------------------
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
}
