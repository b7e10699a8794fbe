//! phish_scan library: heuristic phishing-risk scoring for URLs
//!
//! A submitted URL is validated, checked against a trusted-platform
//! allowlist, resolved through its redirects, and then scored by a fixed set
//! of independent signals (shortener use, tunnel hosting, suspicious path
//! keywords, domain age, certificate validity). Triggered signal weights are
//! summed and compared against a fixed threshold.
//!
//! # Example
//!
//! ```no_run
//! use phish_scan::{scan_url, Config, ScanContext};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = ScanContext::new(&Config::default())?;
//! let assessment = scan_url(&ctx, "https://paypal-login.short-link.me/verify/account").await?;
//! println!(
//!     "score {:?}, phishing: {}",
//!     assessment.risk_score, assessment.is_phishing
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod config;
mod error_handling;
pub mod initialization;
mod redirect;
pub mod scan;
pub mod server;
mod tls;
mod whois;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel, Opt, ScanRules};
pub use error_handling::{InitializationError, ScanError};
pub use redirect::{resolve_final_url, resolve_redirect_chain};
pub use scan::{scan_url, scan_url_isolated, RiskAssessment, ScanContext};
pub use server::{router, serve, start_server, ScanResponse};
pub use tls::{get_peer_certificate, PeerCertificate};
pub use whois::{lookup_creation_date, registrable_domain};
