//! Signal detectors.
//!
//! Each detector is a pure function of the scan request, the resolved target
//! and (for domain age and certificate) what the network phase observed. A
//! detector always yields a [`Signal`]; network failures are mapped to an
//! outcome here and never propagated.

use chrono::{DateTime, Utc};
use strum_macros::{AsRefStr, EnumIter};

use crate::config::ScanRules;

use super::types::{CertificateStatus, RegistrationRecord};

/// The detectors, in warning-list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SignalKind {
    Shortener,
    Tunnel,
    SuspiciousKeywords,
    DomainAge,
    Certificate,
}

/// What a detector concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// The risk indicator is present; the signal's weight counts
    Triggered,
    /// The risk indicator is absent
    Clear,
    /// The detector could not decide (only domain age has this state)
    Unavailable,
}

/// A named detector outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub kind: SignalKind,
    pub weight: u32,
    pub outcome: SignalOutcome,
    /// Warning text; set for triggered and unavailable outcomes
    pub message: Option<String>,
}

impl Signal {
    fn triggered_with(kind: SignalKind, weight: u32, message: String) -> Self {
        Self {
            kind,
            weight,
            outcome: SignalOutcome::Triggered,
            message: Some(message),
        }
    }

    fn clear(kind: SignalKind, weight: u32) -> Self {
        Self {
            kind,
            weight,
            outcome: SignalOutcome::Clear,
            message: None,
        }
    }

    fn unavailable(kind: SignalKind, weight: u32, message: String) -> Self {
        Self {
            kind,
            weight,
            outcome: SignalOutcome::Unavailable,
            message: Some(message),
        }
    }

    pub fn name(&self) -> &str {
        self.kind.as_ref()
    }

    pub fn triggered(&self) -> bool {
        self.outcome == SignalOutcome::Triggered
    }

    /// Weight this signal adds to the score (zero unless triggered).
    pub fn contribution(&self) -> u32 {
        if self.triggered() {
            self.weight
        } else {
            0
        }
    }
}

/// Flags the submitted host when it belongs to a known URL shortener.
///
/// Evaluated on the original host, before redirects, so that the act of
/// shortening itself is what gets scored.
pub fn detect_shortener(rules: &ScanRules, original_host: &str) -> Signal {
    let weight = rules.weights.shortener;
    let host = original_host.to_ascii_lowercase();
    match rules
        .shortener_domains
        .iter()
        .find(|d| host.contains(d.as_str()))
    {
        Some(domain) => Signal::triggered_with(
            SignalKind::Shortener,
            weight,
            format!("URL shortener detected ({})", domain),
        ),
        None => Signal::clear(SignalKind::Shortener, weight),
    }
}

/// Flags final URLs hosted on an ephemeral tunnel service.
pub fn detect_tunnel(rules: &ScanRules, final_url: &str) -> Signal {
    let weight = rules.weights.tunnel;
    let url = final_url.to_ascii_lowercase();
    match rules
        .tunnel_markers
        .iter()
        .find(|m| url.contains(m.as_str()))
    {
        Some(marker) => Signal::triggered_with(
            SignalKind::Tunnel,
            weight,
            format!("Hosted on a temporary tunnel service ({})", marker),
        ),
        None => Signal::clear(SignalKind::Tunnel, weight),
    }
}

/// Lowercase path component of a URL.
///
/// Unparsable URLs fall back to everything after the first `/` following the
/// authority, without query or fragment.
fn url_path(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        return parsed.path().to_ascii_lowercase();
    }
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .find('/')
        .map_or("", |idx| &without_scheme[idx..]);
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].to_ascii_lowercase()
}

/// Flags final URLs whose path mentions credential/account keywords.
pub fn detect_suspicious_keywords(rules: &ScanRules, final_url: &str) -> Signal {
    let weight = rules.weights.keywords;
    let path = url_path(final_url);
    let found: Vec<&str> = rules
        .suspicious_keywords
        .iter()
        .filter(|k| path.contains(k.as_str()))
        .map(String::as_str)
        .collect();

    if found.is_empty() {
        Signal::clear(SignalKind::SuspiciousKeywords, weight)
    } else {
        Signal::triggered_with(
            SignalKind::SuspiciousKeywords,
            weight,
            format!("Suspicious keywords in URL path: {}", found.join(", ")),
        )
    }
}

/// Flags domains registered less than `rules.new_domain_max_days` ago.
///
/// A skipped or failed lookup never triggers but is reported with its own
/// message, distinct from the "new domain" warning.
pub fn assess_domain_age(
    rules: &ScanRules,
    record: RegistrationRecord,
    now: DateTime<Utc>,
) -> Signal {
    let weight = rules.weights.domain_age;
    match record {
        RegistrationRecord::Created(created) => {
            let age_days = (now - created).num_days();
            if age_days < rules.new_domain_max_days {
                Signal::triggered_with(
                    SignalKind::DomainAge,
                    weight,
                    format!("New domain ({} days old)", age_days),
                )
            } else {
                Signal::clear(SignalKind::DomainAge, weight)
            }
        }
        RegistrationRecord::Unavailable => Signal::unavailable(
            SignalKind::DomainAge,
            weight,
            "Domain age unavailable (WHOIS data missing or lookup failed)".to_string(),
        ),
        RegistrationRecord::Skipped => Signal::unavailable(
            SignalKind::DomainAge,
            weight,
            "Domain age not checked (tunnel hosts have no registration record)".to_string(),
        ),
    }
}

/// Flags a certificate that is missing, unreadable or expiring soon.
///
/// Valid means strictly more than `rules.cert_min_valid_days` days left.
/// Every failure mode triggers.
pub fn assess_certificate(
    rules: &ScanRules,
    status: &CertificateStatus,
    now: DateTime<Utc>,
) -> Signal {
    let weight = rules.weights.certificate;
    match status {
        CertificateStatus::Expires(not_after) => {
            let days_left = (*not_after - now).num_days();
            if days_left > rules.cert_min_valid_days {
                Signal::clear(SignalKind::Certificate, weight)
            } else if *not_after <= now {
                Signal::triggered_with(
                    SignalKind::Certificate,
                    weight,
                    "Missing/expired SSL (certificate expired)".to_string(),
                )
            } else {
                Signal::triggered_with(
                    SignalKind::Certificate,
                    weight,
                    format!("SSL certificate expires in {} days", days_left),
                )
            }
        }
        CertificateStatus::Failed(_) => Signal::triggered_with(
            SignalKind::Certificate,
            weight,
            "Missing/expired SSL".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use strum::IntoEnumIterator;

    fn rules() -> ScanRules {
        ScanRules::default()
    }

    #[test]
    fn test_signal_kind_order_and_names() {
        let names: Vec<String> = SignalKind::iter().map(|k| k.as_ref().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "shortener",
                "tunnel",
                "suspicious_keywords",
                "domain_age",
                "certificate"
            ]
        );
    }

    #[test]
    fn test_shortener_detected_on_original_host() {
        let signal = detect_shortener(&rules(), "paypal-login.short-link.me");
        assert!(signal.triggered());
        assert_eq!(signal.weight, 40);
        assert_eq!(signal.contribution(), 40);
        assert!(signal.message.unwrap().contains("short-link.me"));
    }

    #[test]
    fn test_shortener_not_detected_for_regular_host() {
        let signal = detect_shortener(&rules(), "www.example.com");
        assert_eq!(signal.outcome, SignalOutcome::Clear);
        assert_eq!(signal.contribution(), 0);
        assert!(signal.message.is_none());
    }

    #[test]
    fn test_tunnel_detected_anywhere_in_final_url() {
        let signal = detect_tunnel(&rules(), "https://abc-def.trycloudflare.com/x");
        assert!(signal.triggered());
        assert_eq!(signal.weight, 50);

        let signal = detect_tunnel(&rules(), "https://foo.cfargotunnel.com/");
        assert!(signal.triggered());

        assert!(!detect_tunnel(&rules(), "https://cloudflare.com/").triggered());
    }

    #[test]
    fn test_keywords_only_in_path() {
        // Keyword in the host alone does not count
        let signal = detect_suspicious_keywords(&rules(), "https://login.example.com/home");
        assert!(!signal.triggered());

        let signal =
            detect_suspicious_keywords(&rules(), "https://example.com/Verify/Account?x=login");
        assert!(signal.triggered());
        assert_eq!(signal.weight, 30);
        let message = signal.message.unwrap();
        assert!(message.contains("verify"));
        assert!(message.contains("account"));
        // Query string is not part of the path
        assert!(!message.contains("login"));
    }

    #[test]
    fn test_keywords_fallback_path_for_unparsable_url() {
        assert_eq!(url_path("example.com/Secure/x?y=1"), "/secure/x");
        assert_eq!(url_path("example.com"), "");
    }

    #[test]
    fn test_domain_age_new_domain_triggers() {
        let now = Utc::now();
        let signal = assess_domain_age(
            &rules(),
            RegistrationRecord::Created(now - Duration::days(10)),
            now,
        );
        assert!(signal.triggered());
        assert_eq!(signal.weight, 20);
        assert_eq!(signal.message.as_deref(), Some("New domain (10 days old)"));
    }

    #[test]
    fn test_domain_age_boundary() {
        let now = Utc::now();
        let at_364 = assess_domain_age(
            &rules(),
            RegistrationRecord::Created(now - Duration::days(364)),
            now,
        );
        assert!(at_364.triggered());

        let at_365 = assess_domain_age(
            &rules(),
            RegistrationRecord::Created(now - Duration::days(365)),
            now,
        );
        assert_eq!(at_365.outcome, SignalOutcome::Clear);
    }

    #[test]
    fn test_domain_age_unavailable_is_distinct_and_does_not_count() {
        let now = Utc::now();
        let unavailable = assess_domain_age(&rules(), RegistrationRecord::Unavailable, now);
        let skipped = assess_domain_age(&rules(), RegistrationRecord::Skipped, now);
        for signal in [&unavailable, &skipped] {
            assert_eq!(signal.outcome, SignalOutcome::Unavailable);
            assert_eq!(signal.contribution(), 0);
            assert!(!signal.message.as_ref().unwrap().starts_with("New domain"));
        }
        assert_ne!(unavailable.message, skipped.message);
    }

    #[test]
    fn test_certificate_valid_requires_more_than_buffer() {
        let now = Utc::now();
        let valid = assess_certificate(
            &rules(),
            &CertificateStatus::Expires(now + Duration::days(90)),
            now,
        );
        assert_eq!(valid.outcome, SignalOutcome::Clear);

        // Exactly 30 full days left is not enough
        let thirty = assess_certificate(
            &rules(),
            &CertificateStatus::Expires(now + Duration::days(30) + Duration::hours(1)),
            now,
        );
        assert!(thirty.triggered());
        assert_eq!(
            thirty.message.as_deref(),
            Some("SSL certificate expires in 30 days")
        );

        let thirty_one = assess_certificate(
            &rules(),
            &CertificateStatus::Expires(now + Duration::days(31) + Duration::hours(1)),
            now,
        );
        assert!(!thirty_one.triggered());
    }

    #[test]
    fn test_certificate_expired_or_failed_triggers() {
        let now = Utc::now();
        let expired = assess_certificate(
            &rules(),
            &CertificateStatus::Expires(now - Duration::days(2)),
            now,
        );
        assert!(expired.triggered());
        assert!(expired.message.unwrap().starts_with("Missing/expired SSL"));

        let failed = assess_certificate(
            &rules(),
            &CertificateStatus::Failed("handshake failure".to_string()),
            now,
        );
        assert!(failed.triggered());
        assert_eq!(failed.weight, 20);
        assert_eq!(failed.message.as_deref(), Some("Missing/expired SSL"));
    }
}
