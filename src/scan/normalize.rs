//! URL validation, host extraction and the trusted-platform filter.

use log::debug;

use crate::config::ScanRules;
use crate::error_handling::ScanError;

use super::types::ScanRequest;

/// Validates a submitted URL and extracts its lowercase host.
///
/// Only a missing prefix is fatal. A URL that starts with `http://` or
/// `https://` but does not parse still gets scanned, with its host taken from
/// [`domain_of`]'s path-split fallback; the network checks then fail on their
/// own.
///
/// # Errors
///
/// Returns `ScanError::InvalidUrl` if the input is empty or does not start
/// with `http://` or `https://` (case-sensitive).
pub fn normalize_url(raw: &str) -> Result<ScanRequest, ScanError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScanError::InvalidUrl("URL is required".to_string()));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ScanError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    let host = domain_of(trimmed);
    if url::Url::parse(trimmed).is_err() {
        debug!("Unparsable URL {}, using fallback host {:?}", trimmed, host);
    }

    Ok(ScanRequest {
        original_url: trimmed.to_string(),
        host,
    })
}

/// Extracts the lowercase host of a URL.
///
/// Falls back to the first path segment after the scheme when the URL has no
/// recognizable host (e.g. `"example.com/path"`).
pub fn domain_of(url: &str) -> String {
    if let Some(host) = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .filter(|h| !h.is_empty())
    {
        return host;
    }

    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Returns true if the host contains any trusted platform suffix.
///
/// This is a substring containment check, not a strict suffix match:
/// `notblogspot.com.evil.tld` is treated as trusted.
pub fn is_trusted_platform(rules: &ScanRules, host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    match rules
        .trusted_platforms
        .iter()
        .find(|platform| host.contains(platform.as_str()))
    {
        Some(platform) => {
            debug!("Host {} matches trusted platform {}", host, platform);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_accepts_https() {
        let request = normalize_url("https://Example.COM/Path").unwrap();
        assert_eq!(request.original_url, "https://Example.COM/Path");
        assert_eq!(request.host, "example.com");
    }

    #[test]
    fn test_normalize_url_trims_whitespace() {
        let request = normalize_url("  http://example.com/login \n").unwrap();
        assert_eq!(request.original_url, "http://example.com/login");
    }

    #[test]
    fn test_normalize_url_rejects_empty() {
        assert!(matches!(normalize_url(""), Err(ScanError::InvalidUrl(_))));
        assert!(matches!(normalize_url("   "), Err(ScanError::InvalidUrl(_))));
    }

    #[test]
    fn test_normalize_url_rejects_missing_scheme() {
        for input in ["example.com", "ftp://example.com", "www.paypal.com/login", "//x.com"] {
            let err = normalize_url(input).unwrap_err();
            assert!(
                err.to_string().contains("http:// or https://"),
                "{} should be rejected for its scheme",
                input
            );
        }
    }

    #[test]
    fn test_normalize_url_scheme_is_case_sensitive() {
        for input in ["HTTP://EXAMPLE.COM/", "Https://example.com/login"] {
            assert!(
                matches!(normalize_url(input), Err(ScanError::InvalidUrl(_))),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_normalize_url_keeps_unparsable_urls_with_fallback_host() {
        let request = normalize_url("https://exa mple.com/login").unwrap();
        assert_eq!(request.original_url, "https://exa mple.com/login");
        assert_eq!(request.host, "exa mple.com");

        let request = normalize_url("https://").unwrap();
        assert_eq!(request.host, "");
    }

    #[test]
    fn test_normalize_url_accepts_long_urls() {
        let url = format!("https://example.com/{}", "a".repeat(4096));
        assert_eq!(normalize_url(&url).unwrap().host, "example.com");
    }

    #[test]
    fn test_domain_of_uses_host() {
        assert_eq!(domain_of("https://Sub.Example.com:8443/a/b"), "sub.example.com");
    }

    #[test]
    fn test_domain_of_falls_back_to_path_split() {
        assert_eq!(domain_of("example.com/path/x"), "example.com");
        assert_eq!(domain_of("weird://"), "");
    }

    #[test]
    fn test_trusted_platform_substring_match() {
        let rules = ScanRules::default();
        assert!(is_trusted_platform(&rules, "myblog.blogspot.com"));
        assert!(is_trusted_platform(&rules, "user.github.io"));
        // Containment, not suffix
        assert!(is_trusted_platform(&rules, "notblogspot.com.evil.tld"));
        assert!(!is_trusted_platform(&rules, "paypal-login.short-link.me"));
    }
}
