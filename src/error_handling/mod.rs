//! Error handling.
//!
//! Errors are split into:
//! - **Initialization** failures (logger, HTTP client) that stop the process
//! - **Scan** errors returned to the caller: invalid input or an internal fault
//!
//! Network failures inside detectors are not errors at this level; see
//! `scan::signals` for how each one is mapped to an outcome.

mod types;

// Re-export public API
pub use types::{InitializationError, ScanError};
