//! Configuration constants.
//!
//! This module defines the fixed reference data used by the risk engine
//! (weights, thresholds, host and keyword lists) and the network defaults
//! used when no override is given on the command line.

// Scoring
/// Score at or above which a URL is classified as phishing
pub const RISK_THRESHOLD: u32 = 50;
/// Weight of the URL shortener signal
pub const SHORTENER_WEIGHT: u32 = 40;
/// Weight of the tunnel-host signal
pub const TUNNEL_WEIGHT: u32 = 50;
/// Weight of the suspicious path keyword signal
pub const KEYWORD_WEIGHT: u32 = 30;
/// Weight of the newly registered domain signal
pub const DOMAIN_AGE_WEIGHT: u32 = 20;
/// Weight of the missing/expiring certificate signal
pub const CERTIFICATE_WEIGHT: u32 = 20;

/// Domains registered fewer than this many days ago count as new
pub const NEW_DOMAIN_MAX_DAYS: i64 = 365;
/// A certificate must remain valid for more than this many days
pub const CERT_MIN_VALID_DAYS: i64 = 30;

/// Multi-tenant hosting platforms exempted from scoring.
///
/// Matched by substring containment against the submitted host.
pub const TRUSTED_PLATFORMS: &[&str] = &[
    "blogspot.com",
    "github.io",
    "wordpress.com",
    "wixsite.com",
    "sites.google.com",
    "netlify.app",
    "vercel.app",
    "pages.dev",
    "medium.com",
    "notion.site",
];

/// Known URL shortener domains (matched against the submitted host)
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "cutt.ly",
    "rebrand.ly",
    "shorturl.at",
    "tiny.cc",
    "short-link.me",
];

/// Credential and account related keywords looked for in the URL path
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "verify",
    "password",
    "account",
    "secure",
    "update",
    "banking",
    "confirm",
    "wallet",
];

/// Markers of ephemeral tunnel-hosting services
pub const TUNNEL_MARKERS: &[&str] = &["trycloudflare.com", "cfargotunnel.com"];

// Network operation timeouts
/// Redirect resolution timeout in seconds (whole chain)
pub const REDIRECT_TIMEOUT_SECS: u64 = 5;
/// WHOIS/RDAP lookup timeout in seconds
/// whois-service defaults to 30s internally, which would eat the whole scan budget
pub const WHOIS_TIMEOUT_SECS: u64 = 5;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;
/// Overall per-scan time budget in seconds
/// Redirect resolution (5s) runs first, then WHOIS (5s) and TLS (5s + 5s) run concurrently
pub const SCAN_BUDGET_SECS: u64 = 15;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Default listen address and port for the HTTP service
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Default User-Agent string for redirect resolution requests.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
