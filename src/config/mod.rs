//! Application configuration and constants.
//!
//! This module provides:
//! - Scoring constants and reference lists
//! - The immutable [`ScanRules`] shared by every scan
//! - CLI option types and parsing

mod constants;
mod rules;
mod types;

// Re-export all constants
pub use constants::*;
pub use rules::{ScanRules, SignalWeights};
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel, Opt, Timeouts};
