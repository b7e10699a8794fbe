//! Immutable scoring rules shared by every scan.

use super::constants::{
    CERTIFICATE_WEIGHT, CERT_MIN_VALID_DAYS, DOMAIN_AGE_WEIGHT, KEYWORD_WEIGHT,
    NEW_DOMAIN_MAX_DAYS, RISK_THRESHOLD, SHORTENER_DOMAINS, SHORTENER_WEIGHT,
    SUSPICIOUS_KEYWORDS, TRUSTED_PLATFORMS, TUNNEL_MARKERS, TUNNEL_WEIGHT,
};

/// Weight contributed by each signal when it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalWeights {
    pub shortener: u32,
    pub tunnel: u32,
    pub keywords: u32,
    pub domain_age: u32,
    pub certificate: u32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            shortener: SHORTENER_WEIGHT,
            tunnel: TUNNEL_WEIGHT,
            keywords: KEYWORD_WEIGHT,
            domain_age: DOMAIN_AGE_WEIGHT,
            certificate: CERTIFICATE_WEIGHT,
        }
    }
}

/// Reference data for the risk engine.
///
/// Built once at startup, wrapped in an `Arc` and only ever read afterwards.
/// All list entries are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRules {
    pub trusted_platforms: Vec<String>,
    pub shortener_domains: Vec<String>,
    pub suspicious_keywords: Vec<String>,
    pub tunnel_markers: Vec<String>,
    pub weights: SignalWeights,
    pub threshold: u32,
    pub new_domain_max_days: i64,
    pub cert_min_valid_days: i64,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_ascii_lowercase()).collect()
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            trusted_platforms: owned(TRUSTED_PLATFORMS),
            shortener_domains: owned(SHORTENER_DOMAINS),
            suspicious_keywords: owned(SUSPICIOUS_KEYWORDS),
            tunnel_markers: owned(TUNNEL_MARKERS),
            weights: SignalWeights::default(),
            threshold: RISK_THRESHOLD,
            new_domain_max_days: NEW_DOMAIN_MAX_DAYS,
            cert_min_valid_days: CERT_MIN_VALID_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_and_threshold() {
        let rules = ScanRules::default();
        assert_eq!(rules.weights.shortener, 40);
        assert_eq!(rules.weights.tunnel, 50);
        assert_eq!(rules.weights.keywords, 30);
        assert_eq!(rules.weights.domain_age, 20);
        assert_eq!(rules.weights.certificate, 20);
        assert_eq!(rules.threshold, 50);
        assert_eq!(rules.new_domain_max_days, 365);
        assert_eq!(rules.cert_min_valid_days, 30);
    }

    #[test]
    fn test_lists_are_lowercase_and_non_empty() {
        let rules = ScanRules::default();
        for list in [
            &rules.trusted_platforms,
            &rules.shortener_domains,
            &rules.suspicious_keywords,
            &rules.tunnel_markers,
        ] {
            assert!(!list.is_empty());
            assert!(list.iter().all(|s| *s == s.to_ascii_lowercase()));
        }
        assert_eq!(rules.tunnel_markers.len(), 2);
    }
}
