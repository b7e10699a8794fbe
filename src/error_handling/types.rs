//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors a scan can surface to its caller.
///
/// Detector-level failures never appear here; they are mapped to signal
/// outcomes inside the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The submitted URL is missing, empty, malformed or not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other unexpected failure.
    #[error("{0}")]
    Internal(String),
}

impl ScanError {
    /// Whether the error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScanError::InvalidUrl(_))
    }
}
