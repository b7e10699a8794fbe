//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS, REDIRECT_TIMEOUT_SECS,
    SCAN_BUDGET_SECS, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS, WHOIS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `phish_scan` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "phish_scan",
    about = "Heuristic phishing-risk scanner for URLs (HTTP service or one-shot CLI)"
)]
pub struct Opt {
    /// Address to bind the HTTP service to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind the HTTP service to
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Scan this URL once, print the JSON verdict and exit instead of serving
    #[arg(long)]
    pub url: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Redirect resolution timeout in seconds
    #[arg(long, default_value_t = REDIRECT_TIMEOUT_SECS)]
    pub redirect_timeout: u64,

    /// WHOIS/RDAP lookup timeout in seconds
    #[arg(long, default_value_t = WHOIS_TIMEOUT_SECS)]
    pub whois_timeout: u64,

    /// TCP connect timeout for the certificate probe, in seconds
    #[arg(long, default_value_t = TCP_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout: u64,

    /// TLS handshake timeout for the certificate probe, in seconds
    #[arg(long, default_value_t = TLS_HANDSHAKE_TIMEOUT_SECS)]
    pub tls_timeout: u64,

    /// Overall time budget for one scan, in seconds
    #[arg(long, default_value_t = SCAN_BUDGET_SECS)]
    pub scan_budget: u64,

    /// Maximum number of redirect hops to follow
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_redirects: usize,

    /// HTTP User-Agent header value for redirect resolution
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use phish_scan::Config;
///
/// let config = Config {
///     port: 8080,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP service to
    pub host: String,
    /// Port to bind the HTTP service to
    pub port: u16,
    /// One-shot URL (CLI mode)
    pub url: Option<String>,
    /// Log level
    pub log_level: LogLevel,
    /// Log format
    pub log_format: LogFormat,
    /// Redirect resolution timeout in seconds
    pub redirect_timeout_secs: u64,
    /// WHOIS lookup timeout in seconds
    pub whois_timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// TLS handshake timeout in seconds
    pub tls_timeout_secs: u64,
    /// Overall per-scan budget in seconds
    pub scan_budget_secs: u64,
    /// Maximum redirect hops
    pub max_redirects: usize,
    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            url: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            redirect_timeout_secs: REDIRECT_TIMEOUT_SECS,
            whois_timeout_secs: WHOIS_TIMEOUT_SECS,
            connect_timeout_secs: TCP_CONNECT_TIMEOUT_SECS,
            tls_timeout_secs: TLS_HANDSHAKE_TIMEOUT_SECS,
            scan_budget_secs: SCAN_BUDGET_SECS,
            max_redirects: MAX_REDIRECT_HOPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            host: opt.host,
            port: opt.port,
            url: opt.url,
            log_level: opt.log_level,
            log_format: opt.log_format,
            redirect_timeout_secs: opt.redirect_timeout,
            whois_timeout_secs: opt.whois_timeout,
            connect_timeout_secs: opt.connect_timeout,
            tls_timeout_secs: opt.tls_timeout,
            scan_budget_secs: opt.scan_budget,
            max_redirects: opt.max_redirects,
            user_agent: opt.user_agent,
        }
    }
}

/// A configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Per-call network timeouts derived from a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub redirect: Duration,
    pub whois: Duration,
    pub connect: Duration,
    pub tls_handshake: Duration,
    pub scan_budget: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Config::default().timeouts()
    }
}

impl Config {
    /// Checks that the configuration is usable before any resources are built.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let timeouts = [
            ("redirect_timeout_secs", self.redirect_timeout_secs),
            ("whois_timeout_secs", self.whois_timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("tls_timeout_secs", self.tls_timeout_secs),
            ("scan_budget_secs", self.scan_budget_secs),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(ConfigValidationError {
                    field,
                    message: "must be greater than 0 seconds".to_string(),
                });
            }
        }

        let longest_call = self
            .redirect_timeout_secs
            .max(self.whois_timeout_secs)
            .max(self.connect_timeout_secs + self.tls_timeout_secs);
        if self.scan_budget_secs < longest_call {
            return Err(ConfigValidationError {
                field: "scan_budget_secs",
                message: format!(
                    "must be at least {}s (the longest single network call)",
                    longest_call
                ),
            });
        }

        if self.max_redirects == 0 {
            return Err(ConfigValidationError {
                field: "max_redirects",
                message: "must be greater than 0".to_string(),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "user_agent",
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the network timeouts as durations.
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            redirect: Duration::from_secs(self.redirect_timeout_secs),
            whois: Duration::from_secs(self.whois_timeout_secs),
            connect: Duration::from_secs(self.connect_timeout_secs),
            tls_handshake: Duration::from_secs(self.tls_timeout_secs),
            scan_budget: Duration::from_secs(self.scan_budget_secs),
        }
    }

    /// Socket address string the HTTP service binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.redirect_timeout_secs, 5);
        assert_eq!(config.whois_timeout_secs, 5);
        assert_eq!(config.max_redirects, 10);
        assert!(config.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            whois_timeout_secs: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "whois_timeout_secs");
        assert!(err.message.contains("greater than 0"));
    }

    #[test]
    fn test_validate_rejects_budget_smaller_than_single_call() {
        let config = Config {
            scan_budget_secs: 6,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "scan_budget_secs");
        assert!(err.message.contains("10s"));
    }

    #[test]
    fn test_validate_rejects_zero_redirects() {
        let config = Config {
            max_redirects: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "max_redirects");
    }

    #[test]
    fn test_validate_rejects_blank_user_agent() {
        let config = Config {
            user_agent: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "user_agent");
    }

    #[test]
    fn test_opt_parses_defaults() {
        let opt = Opt::parse_from(["phish_scan"]);
        let config = Config::from(opt);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.timeouts().scan_budget, Duration::from_secs(15));
    }

    #[test]
    fn test_opt_parses_one_shot_url() {
        let opt = Opt::parse_from([
            "phish_scan",
            "--url",
            "https://example.com",
            "--log-format",
            "json",
            "--port",
            "8081",
        ]);
        assert_eq!(opt.url.as_deref(), Some("https://example.com"));
        assert!(matches!(opt.log_format, LogFormat::Json));
        assert_eq!(opt.port, 8081);
    }
}
