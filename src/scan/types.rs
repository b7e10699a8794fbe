//! Data carried through a single scan.

use std::fmt;

use chrono::{DateTime, Utc};

use super::signals::Signal;

/// Format used when reporting a domain creation timestamp.
pub const DOMAIN_AGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A validated scan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// The submitted URL, trimmed of surrounding whitespace
    pub original_url: String,
    /// Lowercase host of `original_url`
    pub host: String,
}

/// Where the submitted URL ends up after following redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub final_url: String,
    pub final_domain: String,
    /// Every URL visited, starting with the original one
    pub redirect_chain: Vec<String>,
}

/// Result of the registration-record lookup for the final domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRecord {
    /// Lookup succeeded and yielded a creation date
    Created(DateTime<Utc>),
    /// Lookup failed, timed out, or the record had no usable creation date
    Unavailable,
    /// Lookup not attempted because the final URL is on a tunnel host
    Skipped,
}

/// Result of probing the final domain's TLS certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateStatus {
    /// Handshake succeeded; the leaf certificate expires at this instant
    Expires(DateTime<Utc>),
    /// No certificate could be obtained or parsed
    Failed(String),
}

/// Everything the network phase learned about a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observations {
    pub registration: RegistrationRecord,
    pub certificate: CertificateStatus,
}

/// Domain age as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainAge {
    Created(DateTime<Utc>),
    Unknown,
    TunnelHost,
}

impl From<RegistrationRecord> for DomainAge {
    fn from(record: RegistrationRecord) -> Self {
        match record {
            RegistrationRecord::Created(date) => DomainAge::Created(date),
            RegistrationRecord::Unavailable => DomainAge::Unknown,
            RegistrationRecord::Skipped => DomainAge::TunnelHost,
        }
    }
}

impl fmt::Display for DomainAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainAge::Created(date) => write!(f, "{}", date.format(DOMAIN_AGE_FORMAT)),
            DomainAge::Unknown => f.write_str("Unknown"),
            DomainAge::TunnelHost => f.write_str("N/A (Cloudflare)"),
        }
    }
}

/// Final verdict for one scanned URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    /// The submitted URL, never replaced by the resolved one
    pub url: String,
    /// Resolved URL, present only when it differs from `url`
    pub final_url: Option<String>,
    /// Domain the detectors were evaluated against
    pub domain: String,
    pub domain_age: DomainAge,
    /// `None` when the host is a trusted platform
    pub risk_score: Option<u32>,
    /// Messages of triggered (and unavailable) signals, in evaluation order
    pub warnings: Vec<String>,
    pub is_phishing: bool,
    pub trusted_platform: bool,
    /// Every evaluated signal, triggered or not
    pub signals: Vec<Signal>,
}
